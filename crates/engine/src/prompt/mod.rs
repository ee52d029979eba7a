//! Prompt construction for the external completion service
//!
//! Two fixed templates, selected by query mode. Pure string assembly: the
//! retrieved context is embedded verbatim and an empty context simply yields
//! a thinner prompt.

use crate::intent::QueryMode;
use std::fmt::Write;

/// Build the completion prompt for a question and its retrieved context
pub fn build_prompt(
    question: &str,
    context: &str,
    industry_label: Option<&str>,
    scenario_label: Option<&str>,
    mode: QueryMode,
) -> String {
    match mode {
        QueryMode::PainPoint => {
            pain_point_prompt(question, context, industry_label, scenario_label)
        }
        QueryMode::Discovery => discovery_prompt(question, context),
    }
}

fn pain_point_prompt(
    question: &str,
    context: &str,
    industry_label: Option<&str>,
    scenario_label: Option<&str>,
) -> String {
    let mut prompt = String::new();

    prompt.push_str(
        "You are an experienced B2B sales consultant for PitchPilot, a field sales \
         and order management platform. A potential customer has described a problem. \
         Answer based ONLY on the product knowledge below; do not invent capabilities.\n\n",
    );

    let _ = writeln!(prompt, "Customer problem: {}", question);
    if let Some(industry) = industry_label {
        let _ = writeln!(prompt, "Customer industry: {}", industry);
    }
    if let Some(scenario) = scenario_label {
        let _ = writeln!(prompt, "Known scenario: {}", scenario);
    }

    let _ = writeln!(prompt, "\nProduct knowledge:\n{}", context);

    prompt.push_str(
        "\nStructure your answer with exactly these sections:\n\
         1. The problem as you understand it\n\
         2. The recommended solution with the relevant product modules\n\
         3. Why it pays off: money saved, time saved, growth unlocked\n\
         4. Why the customer should act now\n\
         5. An opening line the sales rep can say verbatim\n\
         6. Three short selling points\n",
    );

    prompt
}

fn discovery_prompt(question: &str, context: &str) -> String {
    let mut prompt = String::new();

    prompt.push_str(
        "You are preparing a product-discovery guide for PitchPilot, a field sales \
         and order management platform. Use ONLY the product knowledge below.\n\n",
    );

    let _ = writeln!(prompt, "Question: {}", question);
    let _ = writeln!(prompt, "\nProduct knowledge:\n{}", context);

    prompt.push_str(
        "\nStructure your answer with exactly these sections:\n\
         1. What the product is, in two sentences\n\
         2. Ideal customer profile: sectors and company-size range\n\
         3. Buying-signal phrases to listen for in conversation\n\
         4. A one-line pitch\n",
    );

    prompt
}
