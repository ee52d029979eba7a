//! Deterministic local answer synthesis
//!
//! Used whenever the external completion service is disabled, unconfigured,
//! or fails. Assembles a long-form structured answer from the retrieved
//! passages alone; every section has a fixed fallback block, so the answer
//! structure is always complete no matter how thin the extraction results
//! are. Pure and side-effect-free given its inputs.

mod extract;

pub use extract::{
    extract_urls, has_pricing_signal, numbered_items, price_mentions, problem_solution_pairs,
    split_sentences, summary_sentences, workflow_sentences,
};

use crate::retrieval::RetrievalResult;
use std::fmt::Write;

/// Minimum sentence length for the executive summary
const SUMMARY_MIN_CHARS: usize = 20;
/// Maximum summary points
const SUMMARY_MAX: usize = 3;
/// Maximum extracted workflow steps
const WORKFLOW_MAX: usize = 5;
/// Numbered-list matches required before they replace the generic procedure
const STEPS_MIN: usize = 3;
/// Maximum rendered numbered steps
const STEPS_MAX: usize = 6;
/// Maximum problem/solution pairs
const PAIRS_MAX: usize = 3;
/// Maximum extracted links
const URLS_MAX: usize = 3;
/// Maximum extracted price mentions
const PRICES_MAX: usize = 5;

/// A product module with its answer-facing role description
struct ModuleRole {
    name: &'static str,
    role: &'static str,
    keywords: &'static [&'static str],
}

/// Known PitchPilot modules and the keywords that reveal them in corpus text
const MODULES: &[ModuleRole] = &[
    ModuleRole {
        name: "CRM",
        role: "keeps every customer card, contact history and deal stage in one place",
        keywords: &["crm", "customer", "lead", "клиент", "сделк", "заявк"],
    },
    ModuleRole {
        name: "Orders",
        role: "captures orders in the field and pushes them straight to fulfilment",
        keywords: &["order", "заказ", "накладн"],
    },
    ModuleRole {
        name: "Inventory",
        role: "tracks stock levels and reservations across warehouses",
        keywords: &["stock", "inventory", "warehouse", "склад", "остат", "запас"],
    },
    ModuleRole {
        name: "Field",
        role: "plans rep routes and records visit check-ins with geolocation",
        keywords: &["field", "visit", "route", "маршрут", "визит", "полев"],
    },
    ModuleRole {
        name: "Analytics",
        role: "turns raw activity into dashboards and scheduled management reports",
        keywords: &["report", "analytic", "dashboard", "отчет", "отчёт", "аналитик"],
    },
    ModuleRole {
        name: "Integrations",
        role: "syncs orders, stock and payments with ERP and accounting systems",
        keywords: &["integration", "erp", "1с", "1c", "интеграц", "обмен данными"],
    },
];

/// Assembles structured answers from retrieved passages
#[derive(Debug, Clone, Default)]
pub struct LocalSynthesizer;

impl LocalSynthesizer {
    pub fn new() -> Self {
        Self
    }

    /// Build the full multi-section answer
    pub fn synthesize(
        &self,
        question: &str,
        industry_label: Option<&str>,
        scenario_label: Option<&str>,
        retrieval: &RetrievalResult,
    ) -> String {
        let context = retrieval.context_text();
        let sentences = split_sentences(&context);

        let mut out = String::new();

        self.write_header(&mut out, question, industry_label, scenario_label);
        self.write_summary(&mut out, &context);
        self.write_workflow(&mut out, &context);
        self.write_modules(&mut out, &context);
        self.write_steps(&mut out, &context);
        self.write_problems(&mut out, &sentences);
        self.write_expected_results(&mut out);
        self.write_technical_details(&mut out, &context);
        self.write_pricing(&mut out, &context);
        self.write_next_steps(&mut out);
        self.write_sources(&mut out, retrieval);

        out
    }

    fn write_header(
        &self,
        out: &mut String,
        question: &str,
        industry_label: Option<&str>,
        scenario_label: Option<&str>,
    ) {
        let _ = writeln!(out, "## {}", question.trim());
        if let Some(industry) = industry_label {
            let _ = writeln!(out, "Industry: {}", industry);
        }
        if let Some(scenario) = scenario_label {
            let _ = writeln!(out, "Scenario: {}", scenario);
        }
        out.push('\n');
    }

    fn write_summary(&self, out: &mut String, context: &str) {
        out.push_str("### Summary\n");
        let points = summary_sentences(context, SUMMARY_MIN_CHARS, SUMMARY_MAX);
        if points.is_empty() {
            out.push_str(
                "1. The available product material covers this topic only briefly; \
                 the sections below outline how the platform approaches it.\n",
            );
        } else {
            for (i, point) in points.iter().enumerate() {
                let _ = writeln!(out, "{}. {}.", i + 1, point);
            }
        }
        out.push('\n');
    }

    fn write_workflow(&self, out: &mut String, context: &str) {
        out.push_str("### How the process flows\n");
        let steps = workflow_sentences(context, WORKFLOW_MAX);
        if steps.is_empty() {
            out.push_str(
                "1. A request or order is captured at its source.\n\
                 2. The platform routes it to the responsible person.\n\
                 3. Stock and customer data are checked automatically.\n\
                 4. The team executes the work and records the outcome.\n\
                 5. Management sees the status in real time.\n",
            );
        } else {
            for (i, step) in steps.iter().enumerate() {
                let _ = writeln!(out, "{}. {}.", i + 1, step);
            }
        }
        out.push('\n');
    }

    fn write_modules(&self, out: &mut String, context: &str) {
        out.push_str("### Modules involved\n");
        let lowered = context.to_lowercase();
        let mut matched = false;

        for module in MODULES {
            if module.keywords.iter().any(|kw| lowered.contains(kw)) {
                let _ = writeln!(out, "**{}** — {}.", module.name, module.role);
                matched = true;
            }
        }

        if !matched {
            out.push_str(
                "**Integrated platform** — the capabilities above are delivered by the \
                 platform as a whole rather than a single module.\n",
            );
        }
        out.push('\n');
    }

    fn write_steps(&self, out: &mut String, context: &str) {
        out.push_str("### Step by step\n");
        let items = numbered_items(context, STEPS_MAX);

        if items.len() >= STEPS_MIN {
            for (i, item) in items.iter().enumerate() {
                let _ = writeln!(
                    out,
                    "{}. {} — what happens: the platform executes this stage; \
                     result: the outcome is recorded and visible to the team.",
                    i + 1,
                    item
                );
            }
        } else {
            out.push_str(
                "1. Connect your catalog and customer base.\n\
                 2. Set up the teams and territories that will work in the system.\n\
                 3. Run daily operations through the platform for one pilot region.\n\
                 4. Review the numbers and extend the rollout.\n",
            );
        }
        out.push('\n');
    }

    fn write_problems(&self, out: &mut String, sentences: &[String]) {
        out.push_str("### Problems this addresses\n");
        let pairs = problem_solution_pairs(sentences, PAIRS_MAX);

        if pairs.is_empty() {
            out.push_str(
                "- Problem: requests arrive through many channels and get lost. \
                 Solution: every request lands in one queue with an owner.\n\
                 - Problem: stock numbers in spreadsheets drift from reality. \
                 Solution: stock is updated at the moment of each transaction.\n\
                 - Problem: managers learn about failures weeks later. \
                 Solution: dashboards surface deviations the day they happen.\n",
            );
        } else {
            for (problem, solution) in &pairs {
                let _ = writeln!(out, "- Problem: {}. Solution: {}.", problem, solution);
            }
        }
        out.push('\n');
    }

    fn write_expected_results(&self, out: &mut String) {
        out.push_str(
            "### Expected results\n\
             - Less time spent on manual coordination and re-entry.\n\
             - Fewer errors in orders, stock and customer data.\n\
             - Full visibility of field activity for managers.\n\
             - Tighter coordination between office, warehouse and field teams.\n\
             - A traceable history for every order and customer interaction.\n\n",
        );
    }

    fn write_technical_details(&self, out: &mut String, context: &str) {
        out.push_str("### Technical details\n");
        let urls = extract_urls(context, URLS_MAX);
        for url in &urls {
            let _ = writeln!(out, "- Reference: {}", url);
        }
        out.push_str(
            "- Works in the browser and on mobile devices used by field teams.\n\
             - Data is exchanged with ERP and accounting systems through standard integrations.\n\
             - Access is role-based; each employee sees only their own scope.\n\n",
        );
    }

    fn write_pricing(&self, out: &mut String, context: &str) {
        if !has_pricing_signal(context) {
            return;
        }

        out.push_str("### Pricing notes\n");
        for price in price_mentions(context, PRICES_MAX) {
            let _ = writeln!(out, "- Mentioned in the materials: {}", price);
        }
        out.push_str(
            "- Customers typically report 15-30% less time on routine coordination \
             and a noticeable drop in order errors within the first quarter.\n\
             - Teams usually recoup the subscription through reduced losses and \
             faster order handling within the first months of use.\n\n",
        );
    }

    fn write_next_steps(&self, out: &mut String) {
        out.push_str(
            "### Next steps\n\
             1. Review how the scenarios above map to your current process.\n\
             2. Agree on a rollout plan with the teams involved.\n\
             3. Run a pilot on one region or product line.\n\
             4. Scale to the rest of the organization.\n\n",
        );
    }

    fn write_sources(&self, out: &mut String, retrieval: &RetrievalResult) {
        out.push_str("---\nSources:\n");
        for scored in &retrieval.passages {
            let _ = writeln!(
                out,
                "- {} (part {}) — relevance {:.1}%",
                scored.passage.source_label,
                scored.passage.chunk_index,
                scored.score * 100.0
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::{ChunkingConfig, CorpusIndex, SourceDocument};
    use crate::retrieval::{vectorize_text, Ranker};

    fn retrieval_for(texts: &[&str], query: &str) -> RetrievalResult {
        let docs: Vec<SourceDocument> = texts
            .iter()
            .enumerate()
            .map(|(i, t)| SourceDocument {
                label: format!("guide-{}", i),
                text: t.to_string(),
            })
            .collect();
        let config = ChunkingConfig {
            chunk_size: 2000,
            min_chunk_size: 1,
        };
        let index = CorpusIndex::build(&docs, &config);
        Ranker::new(0.01).rank(&vectorize_text(query), &index, 6)
    }

    #[test]
    fn test_synthesis_always_structured_and_non_empty() {
        let retrieval = retrieval_for(&["Система хранит карточки клиентов"], "клиентов");
        let answer = LocalSynthesizer::new().synthesize("Как вести клиентов?", None, None, &retrieval);

        assert!(!answer.is_empty());
        for section in [
            "### Summary",
            "### How the process flows",
            "### Modules involved",
            "### Step by step",
            "### Problems this addresses",
            "### Expected results",
            "### Technical details",
            "### Next steps",
            "Sources:",
        ] {
            assert!(answer.contains(section), "missing section {}", section);
        }
    }

    #[test]
    fn test_generic_fallbacks_when_extraction_finds_nothing() {
        let retrieval = retrieval_for(&["Краткий текст о платформе без деталей"], "платформе");
        let answer =
            LocalSynthesizer::new().synthesize("Что умеет система?", None, None, &retrieval);

        // No workflow keywords and no numbered lists in the corpus text
        assert!(answer.contains("routes it to the responsible person"));
        assert!(answer.contains("Connect your catalog"));
        // No pricing signal, section omitted entirely
        assert!(!answer.contains("### Pricing notes"));
    }

    #[test]
    fn test_extracted_workflow_and_modules() {
        let text = "Заявка поступает в CRM. После подтверждения склад получает задание на сборку. \
                    Затем торговый представитель видит статус заказа.";
        let retrieval = retrieval_for(&[text], "заявка склад заказа");
        let answer = LocalSynthesizer::new().synthesize("Как идет заказ?", None, None, &retrieval);

        assert!(answer.contains("склад получает задание"));
        assert!(answer.contains("**CRM**"));
        assert!(answer.contains("**Inventory**"));
    }

    #[test]
    fn test_numbered_steps_extracted_when_three_or_more() {
        let text = "Инструкция по запуску платформы для новой команды: 1. Создайте рабочее \
                    пространство для команды 2. Загрузите каталог товаров из файла 3. Пригласите \
                    сотрудников по ссылке 4. Назначьте территории для работы";
        let retrieval = retrieval_for(&[text], "инструкция запуску");
        let answer = LocalSynthesizer::new().synthesize("Как запустить?", None, None, &retrieval);

        assert!(answer.contains("Создайте рабочее"));
        assert!(answer.contains("what happens"));
        assert!(!answer.contains("Connect your catalog"));
    }

    #[test]
    fn test_pricing_section_conditional() {
        let text = "Подписка стоит 4 900 ₽ в месяц за команду до десяти сотрудников.";
        let retrieval = retrieval_for(&[text], "подписка стоит");
        let answer = LocalSynthesizer::new().synthesize("Сколько стоит?", None, None, &retrieval);

        assert!(answer.contains("### Pricing notes"));
        assert!(answer.contains("recoup the subscription"));
    }

    #[test]
    fn test_header_labels_and_sources_footer() {
        let retrieval = retrieval_for(&["Платформа для полевых продаж и заказов"], "платформа");
        let answer = LocalSynthesizer::new().synthesize(
            "Что это?",
            Some("Retail & e-commerce"),
            Some("Manual, spreadsheet-driven processes"),
            &retrieval,
        );

        assert!(answer.starts_with("## Что это?"));
        assert!(answer.contains("Industry: Retail & e-commerce"));
        assert!(answer.contains("Scenario: Manual, spreadsheet-driven processes"));
        assert!(answer.contains("guide-0 (part 0) — relevance"));
        assert!(answer.contains('%'));
    }
}
