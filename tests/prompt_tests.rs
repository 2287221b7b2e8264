// SPDX-FileCopyrightText: 2025 RAprogramm
// SPDX-License-Identifier: MIT

use sql_query_generator::{
    prompt::{build_system_prompt, build_user_prompt},
    questions::Question,
    schema::Warehouse
};

fn question() -> Question {
    Question {
        question_id: 3,
        question:    String::from("Top 5 regions by revenue?")
    }
}

fn warehouses() -> Vec<Warehouse> {
    let sales = r#"{
        "database": "sales_dw",
        "tables": {
            "orders": {
                "columns": {
                    "total": { "type": "DECIMAL(10,2)", "description": "order total" }
                }
            }
        }
    }"#;
    let marketing = r#"{
        "database": "marketing_dw",
        "tables": {
            "campaigns": {
                "columns": {
                    "spend": { "type": "DECIMAL(10,2)", "description": "campaign spend" }
                }
            }
        }
    }"#;
    vec![
        Warehouse::from_json(sales, "sales_dw.json").unwrap(),
        Warehouse::from_json(marketing, "marketing_dw.json").unwrap(),
    ]
}

#[test]
fn test_system_prompt_carries_output_contract() {
    let prompt = build_system_prompt(&question());

    assert!(prompt.contains("expert SQL architect"));
    assert!(prompt.contains("\"question_id\": 3"));
    assert!(prompt.contains("Top 5 regions by revenue?"));
    assert!(prompt.contains("target_source"));
    assert!(prompt.contains("assumptions"));
    assert!(prompt.contains("confidence"));
    assert!(prompt.contains("strict JSON"));
}

#[test]
fn test_user_prompt_lists_every_warehouse() {
    let prompt = build_user_prompt(&warehouses(), &question());

    assert!(prompt.contains("Database: sales_dw"));
    assert!(prompt.contains("Database: marketing_dw"));
    assert!(prompt.contains("Question ID: 3"));
    assert!(prompt.contains("Top 5 regions by revenue?"));
}

#[test]
fn test_user_prompt_schema_precedes_question() {
    let prompt = build_user_prompt(&warehouses(), &question());
    let schema_pos = prompt.find("Database: sales_dw").unwrap();
    let question_pos = prompt.find("Question to answer:").unwrap();
    assert!(schema_pos < question_pos);
}
