//! Label dictionaries for industry and scenario codes
//!
//! The serving layer passes short codes; the engine renders human-readable
//! labels in prompts and answer headers. Unknown codes pass through as-is so
//! new codes degrade gracefully instead of failing.

/// Resolve an industry code to its display label
pub fn industry_label(code: &str) -> String {
    match code {
        "retail" => "Retail & e-commerce".to_string(),
        "manufacturing" => "Manufacturing".to_string(),
        "logistics" => "Logistics & distribution".to_string(),
        "construction" => "Construction".to_string(),
        "healthcare" => "Healthcare".to_string(),
        "services" => "Professional services".to_string(),
        "fmcg" => "FMCG & wholesale".to_string(),
        other => other.to_string(),
    }
}

/// Resolve a scenario code to its display label
pub fn scenario_label(code: &str) -> String {
    match code {
        "lost-leads" => "Leads slipping through the cracks".to_string(),
        "manual-processes" => "Manual, spreadsheet-driven processes".to_string(),
        "stock-errors" => "Inventory and stock errors".to_string(),
        "field-visibility" => "No visibility into field teams".to_string(),
        "reporting-delays" => "Slow management reporting".to_string(),
        "order-chaos" => "Order capture spread across channels".to_string(),
        other => other.to_string(),
    }
}
