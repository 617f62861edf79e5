//! Ranking contract checks through the public API.

use rerank::{MockScorer, RankingError, RerankRequest, Reranker};

fn score_table() -> Vec<(Vec<&'static str>, Vec<f32>)> {
    vec![
        (vec!["a"], vec![0.0]),
        (vec!["a", "b"], vec![1.0, 1.0]),
        (vec!["a", "b", "c"], vec![-1.0, 4.5, -1.0]),
        (vec!["a", "b", "c", "d"], vec![0.25, 0.75, 0.5, 0.75]),
        (
            vec!["a", "b", "c", "d", "e", "f", "g"],
            vec![3.0, -2.0, 3.0, 0.0, 10.0, -2.0, 0.0],
        ),
    ]
}

#[test]
fn every_response_is_a_stable_descending_permutation() {
    for (documents, scores) in score_table() {
        let reranker = Reranker::new(MockScorer::fixed(scores.clone()));
        let response = reranker
            .rerank(RerankRequest::new("query", documents.clone()))
            .unwrap();

        assert_eq!(response.len(), documents.len());

        let positions: Vec<usize> = response
            .documents()
            .map(|d| documents.iter().position(|x| *x == d).unwrap())
            .collect();

        let mut seen = positions.clone();
        seen.sort_unstable();
        assert_eq!(seen, (0..documents.len()).collect::<Vec<_>>());

        for (ranked, &idx) in response.reranked_documents.iter().zip(&positions) {
            assert_eq!(ranked.score, scores[idx]);
        }

        for window in positions.windows(2) {
            let (a, b) = (window[0], window[1]);
            assert!(scores[a] >= scores[b]);
            if scores[a] == scores[b] {
                assert!(a < b, "tie between {a} and {b} reordered");
            }
        }
    }
}

#[test]
fn cat_query_ranks_feline_above_unrelated() {
    let reranker = Reranker::new(MockScorer::fixed([0.9, 0.1, 0.5]));
    let response = reranker
        .rerank(RerankRequest::new(
            "cat",
            ["a cat sat", "unrelated text", "a feline animal"],
        ))
        .unwrap();

    let ranked: Vec<(&str, f32)> = response
        .reranked_documents
        .iter()
        .map(|d| (d.document.as_str(), d.score))
        .collect();
    assert_eq!(
        ranked,
        [
            ("a cat sat", 0.9),
            ("a feline animal", 0.5),
            ("unrelated text", 0.1)
        ]
    );
}

#[test]
fn failures_produce_no_documents() {
    let reranker = Reranker::new(MockScorer::failing("tensor shape mismatch"));

    let result = reranker.rerank(RerankRequest::new("q", ["a", "b", "c"]));

    assert!(matches!(result, Err(RankingError::Scorer(_))));
}
