use storage::{OpenTdbQuestionBank, QuestionSource};
use trivia_core::model::Difficulty;

const BANK: &str = r#"{
    "response_code": 0,
    "results": [
        {
            "category": "Geography",
            "type": "multiple",
            "difficulty": "medium",
            "question": "Which river flows through Cairo?",
            "correct_answer": "Nile",
            "incorrect_answers": ["Danube", "Amazon", "Volga"]
        },
        {
            "category": "Geography",
            "type": "multiple",
            "difficulty": "easy",
            "question": "Largest ocean?",
            "correct_answer": "Pacific",
            "incorrect_answers": ["Atlantic", "Indian", "Arctic"]
        }
    ]
}"#;

#[tokio::test]
async fn file_bank_loads_and_filters() {
    let path = std::env::temp_dir().join(format!("trivia_bank_{}.json", std::process::id()));
    tokio::fs::write(&path, BANK).await.expect("write bank");

    let bank = OpenTdbQuestionBank::from_path(&path);
    let all = bank.load(true, Difficulty::All).await;
    let medium = bank.load(true, Difficulty::Medium).await;
    tokio::fs::remove_file(&path).await.ok();

    assert_eq!(all.len(), 2);
    assert_eq!(medium.len(), 1);
    assert_eq!(medium[0].prompt(), "Which river flows through Cairo?");
    assert_eq!(medium[0].options().len(), 4);
}

#[tokio::test]
async fn try_load_reports_missing_file() {
    let bank = OpenTdbQuestionBank::from_path("/nonexistent/trivia/data.json");
    assert!(bank.try_load(true, Difficulty::All).await.is_err());
}
