use crate::engine::scoring::{rating, Answers};
use crate::types::quiz::{PriorityRules, QuizDef};
use crate::types::report::{PriorityItem, PriorityStrength};
use std::cmp::Reverse;

/// Answers at or above the configured floor, tagged by strength and sorted
/// strongest-first. Ties keep question order; used for display only.
pub fn extract_priorities(def: &QuizDef, rules: &PriorityRules, answers: &Answers) -> Vec<PriorityItem> {
    let mut priorities: Vec<PriorityItem> = def
        .questions
        .iter()
        .filter_map(|question| {
            let value = rating(def, answers, question.id);
            if value < rules.min_value {
                return None;
            }
            let strength = if value >= rules.hard {
                PriorityStrength::Hard
            } else if value >= rules.high {
                PriorityStrength::High
            } else {
                PriorityStrength::Medium
            };
            Some(PriorityItem {
                text: question.text.clone(),
                value,
                strength,
            })
        })
        .collect();
    priorities.sort_by_key(|priority| Reverse(priority.value));
    priorities
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quizzes;

    #[test]
    fn priorities_filter_tag_and_sort() {
        let loaded = quizzes::builtin("community-finder").expect("builtin should load");
        let def = loaded.def;
        let rules = def.priorities.expect("community finder declares priority rules");

        let mut answers = Answers::new();
        for question in &def.questions {
            answers.insert(question.id, 0);
        }
        answers.insert(1, 9);
        answers.insert(2, 8);
        answers.insert(3, 5);
        answers.insert(4, 4);
        answers.insert(5, 10);

        let priorities = extract_priorities(&def, &rules, &answers);
        let values: Vec<u8> = priorities.iter().map(|priority| priority.value).collect();
        assert_eq!(values, vec![10, 9, 8, 5]);

        assert_eq!(priorities[0].strength, PriorityStrength::Hard);
        assert_eq!(priorities[1].strength, PriorityStrength::Hard);
        assert_eq!(priorities[2].strength, PriorityStrength::High);
        assert_eq!(priorities[3].strength, PriorityStrength::Medium);
    }

    #[test]
    fn equal_values_keep_question_order() {
        let loaded = quizzes::builtin("community-finder").expect("builtin should load");
        let def = loaded.def;
        let rules = def.priorities.expect("priority rules");

        let mut answers = Answers::new();
        for question in &def.questions {
            answers.insert(question.id, 0);
        }
        answers.insert(7, 6);
        answers.insert(2, 6);

        let priorities = extract_priorities(&def, &rules, &answers);
        let texts: Vec<&str> = priorities.iter().map(|priority| priority.text.as_str()).collect();
        let q2 = def.question(2).expect("question 2").text.as_str();
        let q7 = def.question(7).expect("question 7").text.as_str();
        assert_eq!(texts, vec![q2, q7]);
    }
}
