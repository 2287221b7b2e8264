//! Prompt construction for SQL generation.
//!
//! The system prompt fixes the model's role, the validation steps it must
//! walk through, and the strict JSON output contract. The user prompt
//! carries the rendered warehouse schemas and the question itself. Keeping
//! the contract in the system prompt and the data in the user prompt lets a
//! provider cache the instruction half across questions.

use crate::{questions::Question, schema::Warehouse};

/// Build the system prompt carrying the output contract for one question
pub fn build_system_prompt(question: &Question) -> String {
    format!(
        r#"You are an expert SQL architect. Generate ANSI SQL only if all required data exists within ONE warehouse.

Think step by step and self-assess:

1. PARSE: which tables and columns does this question need?
2. VALIDATE PER WAREHOUSE: do ALL required tables and columns exist in a single warehouse? If the data is split across warehouses, explain why you cannot generate.
3. JOIN LOGIC: use only documented relationships (foreign keys).
4. CONFIDENCE: assign a decimal score from 0.0 to 1.0 based on your own judgment of certainty. 1.0 = fully certain, 0.0 = impossible or missing data. No predefined thresholds.
5. ASSUMPTIONS: explain what you checked, why you chose target_source, and the justification for your confidence.

Output format (strict JSON, no extra text):
{{
  "question_id": {id},
  "question": "{question}",
  "target_source": "<warehouse database name or N/A>",
  "sql": "SELECT ... OR '-- Cannot generate: [reason]'",
  "assumptions": "your detailed reasoning - what you validated, what you assumed",
  "confidence": 0.0 to 1.0
}}

Never bluff. If unsure, lower the confidence. You are graded on honesty and reasoning depth."#,
        id = question.question_id,
        question = question.question
    )
}

/// Build the user prompt with every warehouse schema and the question
pub fn build_user_prompt(warehouses: &[Warehouse], question: &Question) -> String {
    let mut prompt = String::from(
        "Available warehouses - validate table existence before writing SQL:\n\n"
    );
    for warehouse in warehouses {
        prompt.push_str(&warehouse.to_prompt());
    }
    prompt.push_str(&format!(
        r#"Question to answer:
Question ID: {id}
Question: "{question}"

Your task:
- Decide which warehouse contains ALL required data.
- Write SQL only if the data exists in one warehouse.
- If joining tables, confirm they share a documented relationship.
- Be transparent in assumptions and score confidence honestly."#,
        id = question.question_id,
        question = question.question
    ));
    prompt
}
