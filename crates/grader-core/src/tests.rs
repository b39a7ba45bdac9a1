//! End-to-end tests for the grading engine

#[cfg(test)]
mod scenario_tests {
    use crate::{
        generate_suggestions, grade_prompt, Criterion, GradingConfig, PromptGrader, ScoreBand,
        PERFECT_PROMPT_EXAMPLE,
    };
    use insta::assert_yaml_snapshot;

    fn grader() -> PromptGrader {
        PromptGrader::with_defaults().unwrap()
    }

    fn sample_prompts() -> Vec<String> {
        vec![
            "".to_string(),
            "   ".to_string(),
            "Help.".to_string(),
            "Write a short story.".to_string(),
            "maybe some nice good stuff, kind of".to_string(),
            "Écris un poème sur la mer, s'il te plaît 🌊".to_string(),
            "first second third finally also additionally".to_string(),
            PERFECT_PROMPT_EXAMPLE.to_string(),
            "word ".repeat(2_000),
            "and ".repeat(50),
            "it this that these those um uh like".to_string(),
        ]
    }

    #[test]
    fn test_score_is_always_within_bounds() {
        let grader = grader();
        for prompt in sample_prompts() {
            let breakdown = grader.breakdown(&prompt);
            assert!(breakdown.score <= 100, "prompt {:?}", prompt);
            for sub in &breakdown.sub_scores {
                assert!((0.0..=100.0).contains(&sub.value), "{:?} for {:?}", sub, prompt);
            }
        }
    }

    #[test]
    fn test_blank_prompts_score_zero() {
        assert_eq!(grade_prompt(""), 0);
        assert_eq!(grade_prompt("   "), 0);
        assert_eq!(grade_prompt("\n\t"), 0);
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let grader = grader();
        for prompt in sample_prompts() {
            assert_eq!(grader.grade(&prompt), grader.grade(&prompt));
            assert_eq!(grader.suggest(&prompt), grader.suggest(&prompt));
        }
    }

    #[test]
    fn test_persona_never_lowers_the_score() {
        let grader = grader();
        let prompts = [
            "Write a short story.",
            "Explain how vaccines work for a school project.",
            "Summarize this report in 5 bullet points for the board.",
            PERFECT_PROMPT_EXAMPLE,
        ];

        for prompt in prompts {
            let with_persona = format!("Act as an expert writer. {}", prompt);
            assert!(
                grader.grade(&with_persona) >= grader.grade(prompt),
                "persona lowered score for {:?}",
                prompt
            );
        }

        assert!(
            grader.grade("Act as an expert novelist. Write a short story.")
                > grader.grade("Write a short story.")
        );
    }

    #[test]
    fn test_suggestion_count_is_capped() {
        let grader = grader();
        for prompt in sample_prompts() {
            assert!(grader.suggest(&prompt).len() <= 6, "prompt {:?}", prompt);
        }

        let config = GradingConfig::default().with_max_suggestions(2);
        let grader = PromptGrader::new(config).unwrap();
        assert_eq!(grader.suggest("hi").len(), 2);
    }

    #[test]
    fn test_persona_suggestion_tracks_role_phrase() {
        let grader = grader();
        let has_persona_hint = |prompt: &str| {
            grader
                .suggest(prompt)
                .iter()
                .any(|s| s.category == Criterion::Persona)
        };

        assert!(has_persona_hint("Write a short story."));
        assert!(!has_persona_hint("You are a novelist. Write a short story."));
        assert!(!has_persona_hint("Pretend to be a pirate and tell a joke."));
    }

    #[test]
    fn test_length_boundaries() {
        let grader = grader();
        let ten = vec!["word"; 10].join(" ");
        let fifty = vec!["word"; 50].join(" ");

        assert_eq!(grader.breakdown(&ten).get(Criterion::Length), Some(60.0));
        assert_eq!(grader.breakdown(&fifty).get(Criterion::Length), Some(100.0));
    }

    #[test]
    fn test_short_story_prompt_scores_poorly() {
        let evaluation = grader().evaluate("Write a short story.");

        assert_eq!(evaluation.score, 34);
        assert_eq!(evaluation.label, "Poor");
        assert_eq!(evaluation.band, ScoreBand::Poor);

        let categories: Vec<_> = evaluation
            .suggestions
            .iter()
            .map(|s| s.category.display_name())
            .collect();
        assert_yaml_snapshot!(categories, @r###"
        ---
        - Persona
        - Examples
        - Specificity
        - Context
        - Structure
        - Specificity
        "###);
    }

    #[test]
    fn test_perfect_prompt_scores_full_marks() {
        let grader = grader();
        let breakdown = grader.breakdown(PERFECT_PROMPT_EXAMPLE);

        assert_eq!(breakdown.score, 100);
        for sub in &breakdown.sub_scores {
            assert_eq!(sub.value, 100.0, "{:?}", sub.criterion);
        }
    }

    #[test]
    fn test_perfect_prompt_gets_only_stylistic_notes() {
        let engine = grader();
        let ids: Vec<_> = engine
            .suggestion_engine()
            .matching_rules(PERFECT_PROMPT_EXAMPLE)
            .map(|rule| rule.id)
            .collect();

        assert_eq!(ids, vec!["too-long", "multiple-requests", "unclear-pronouns"]);

        let suggestions = engine.suggest(PERFECT_PROMPT_EXAMPLE);
        assert!(suggestions.iter().all(|s| !matches!(
            s.category,
            Criterion::Persona | Criterion::Examples | Criterion::Context | Criterion::Specificity
        )));
    }

    #[test]
    fn test_empty_prompt_gets_nothing() {
        assert_eq!(grade_prompt(""), 0);
        assert!(generate_suggestions("").is_empty());

        let evaluation = grader().evaluate("");
        assert_eq!(evaluation.score, 0);
        assert_eq!(evaluation.label, "No Prompt");
        assert!(evaluation.suggestions.is_empty());
    }

    #[test]
    fn test_default_functions_match_default_grader() {
        let grader = grader();
        for prompt in sample_prompts() {
            assert_eq!(grade_prompt(&prompt), grader.grade(&prompt));
            assert_eq!(generate_suggestions(&prompt), grader.suggest(&prompt));
        }
    }

    #[test]
    fn test_config_snapshot() {
        assert_yaml_snapshot!(GradingConfig::default(), @r###"
        ---
        criteria:
          length:
            weight: 0.15
            min: 10
            optimal: 50
            comfort_limit: 100
          clarity:
            weight: 0.25
          specificity:
            weight: 0.2
          context:
            weight: 0.15
          persona:
            weight: 0.1
          examples:
            weight: 0.1
          structure:
            weight: 0.05
        max_suggestions: 6
        "###);
    }
}
