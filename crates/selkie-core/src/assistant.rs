//! Deterministic template-substitution assistant.
//!
//! There is no model behind this: a keyword table picks a diagram type, a
//! fixed template supplies the skeleton, and concepts extracted from the
//! description are substituted in. Same input, same output, every time.

use std::sync::OnceLock;

use regex::{Regex, RegexBuilder};

use crate::detect::DiagramType;

// Table order is the tie-break: the first type with any keyword hit wins.
const KEYWORDS: [(DiagramType, &[&str]); 8] = [
    (DiagramType::Flowchart, &["flow", "process", "workflow", "step"]),
    (DiagramType::Sequence, &["sequence", "interaction", "message"]),
    (DiagramType::Gantt, &["timeline", "schedule", "project"]),
    (DiagramType::Class, &["class", "object", "structure"]),
    (DiagramType::State, &["state", "status", "condition"]),
    (DiagramType::Pie, &["distribution", "proportion"]),
    (DiagramType::Er, &["entity", "relationship"]),
    (DiagramType::Journey, &["journey", "experience"]),
];

fn generation_template(diagram_type: DiagramType) -> &'static str {
    match diagram_type {
        DiagramType::Sequence => {
            "sequenceDiagram\n    participant User\n    participant System\n    User->>System: Request\n    System-->>User: Response"
        }
        DiagramType::Gantt => {
            "gantt\n    title Project Timeline\n    dateFormat  YYYY-MM-DD\n    section Section\n    Task 1 :a1, 2024-01-01, 30d\n    Task 2 :after a1  , 20d"
        }
        DiagramType::Class => {
            "classDiagram\n    class ClassName {\n      +property: type\n      +method(): returnType\n    }"
        }
        DiagramType::State => {
            "stateDiagram-v2\n    [*] --> State1\n    State1 --> State2: Transition\n    State2 --> [*]"
        }
        DiagramType::Pie => {
            "pie title Distribution\n    \"Category 1\" : 40\n    \"Category 2\" : 30\n    \"Category 3\" : 30"
        }
        DiagramType::Er => {
            "erDiagram\n    ENTITY1 ||--o{ ENTITY2 : has\n    ENTITY1 {\n        string name\n    }\n    ENTITY2 {\n        string description\n    }"
        }
        DiagramType::Journey => {
            "journey\n    title User Journey\n    section Section\n      Activity: 5: Actor"
        }
        _ => {
            "graph TD\n    A[Start] --> B{Condition}\n    B -->|Yes| C[Action 1]\n    B -->|No| D[Action 2]\n    C --> E[End]\n    D --> E"
        }
    }
}

/// Picks the diagram type whose keywords appear in the description; defaults
/// to flowchart.
pub fn detect_requested_type(description: &str) -> DiagramType {
    let lowered = description.to_ascii_lowercase();
    for (diagram_type, keywords) in KEYWORDS {
        if keywords.iter().any(|keyword| lowered.contains(keyword)) {
            return diagram_type;
        }
    }
    DiagramType::Flowchart
}

fn word_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[a-zA-Z]+").unwrap())
}

/// Extracts capitalized, de-duplicated concept words in insertion order.
pub fn extract_concepts(description: &str) -> Vec<String> {
    let mut concepts: Vec<String> = Vec::new();
    for word in word_re().find_iter(description) {
        let word = word.as_str();
        let mut chars = word.chars();
        let capitalized = match chars.next() {
            Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
            None => continue,
        };
        if !concepts.contains(&capitalized) {
            concepts.push(capitalized);
        }
    }
    concepts
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedDiagram {
    pub diagram_type: DiagramType,
    pub source: String,
}

/// Generates diagram source from a free-text description.
///
/// Flowcharts become a chain of up to five concept nodes; every other type
/// substitutes concepts into digit-indexed placeholders of its template.
pub fn generate(description: &str) -> GeneratedDiagram {
    let diagram_type = detect_requested_type(description);
    let template = generation_template(diagram_type);
    let concepts = extract_concepts(description);

    if concepts.is_empty() {
        return GeneratedDiagram {
            diagram_type,
            source: template.to_string(),
        };
    }

    let source = if diagram_type == DiagramType::Flowchart {
        let nodes: Vec<&String> = concepts.iter().take(5).collect();
        if nodes.len() == 1 {
            format!("graph TD\n    A[{}]", nodes[0])
        } else {
            let mut out = String::from("graph TD\n");
            for (i, pair) in nodes.windows(2).enumerate() {
                let from = (b'A' + i as u8) as char;
                let to = (b'B' + i as u8) as char;
                out.push_str(&format!("    {from}[{}] --> {to}[{}]\n", pair[0], pair[1]));
            }
            out
        }
    } else {
        let mut out = template.to_string();
        for (index, concept) in concepts.iter().enumerate() {
            let suffix = if index == 0 {
                String::new()
            } else {
                index.to_string()
            };
            let pattern = format!(
                r"(Entity|Task|Activity|ClassName|Category|State|Participant|Action|Condition)\s*{suffix}"
            );
            let re = RegexBuilder::new(&pattern)
                .case_insensitive(true)
                .build()
                .expect("placeholder pattern is valid");
            out = re.replace_all(&out, concept.as_str()).into_owned();
        }
        out
    };

    GeneratedDiagram {
        diagram_type,
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_table_order_breaks_ties() {
        assert_eq!(
            detect_requested_type("a workflow of class objects"),
            DiagramType::Flowchart
        );
        assert_eq!(
            detect_requested_type("message interaction between services"),
            DiagramType::Sequence
        );
        assert_eq!(detect_requested_type("show me the schedule"), DiagramType::Gantt);
        assert_eq!(detect_requested_type("entity relationships"), DiagramType::Er);
    }

    #[test]
    fn unknown_description_defaults_to_flowchart() {
        assert_eq!(detect_requested_type("draw something nice"), DiagramType::Flowchart);
    }

    #[test]
    fn concepts_are_capitalized_and_deduplicated() {
        assert_eq!(
            extract_concepts("signup, then email verification, then signup again"),
            vec!["Signup", "Then", "Email", "Verification", "Again"]
        );
    }

    #[test]
    fn flowchart_generation_chains_up_to_five_nodes() {
        let out = generate("flow: alpha beta gamma delta epsilon zeta");
        assert_eq!(out.diagram_type, DiagramType::Flowchart);
        // "flow" itself is the first concept; the chain is capped at 5 nodes.
        assert_eq!(out.source.lines().count(), 5);
        assert!(out.source.starts_with("graph TD\n"));
        assert!(out.source.contains("A[Flow] --> B[Alpha]"));
        assert!(!out.source.contains("Epsilon"));
    }

    #[test]
    fn single_concept_flowchart_is_one_node() {
        let out = generate("flow");
        assert_eq!(out.source, "graph TD\n    A[Flow]");
    }

    #[test]
    fn other_types_substitute_placeholders() {
        let out = generate("class diagram for Account");
        assert_eq!(out.diagram_type, DiagramType::Class);
        assert!(out.source.starts_with("classDiagram"));
        // First concept replaces the bare placeholder.
        assert!(!out.source.contains("ClassName"));
    }

    #[test]
    fn generation_is_deterministic() {
        let description = "sequence of checkout messages";
        assert_eq!(generate(description), generate(description));
    }
}
