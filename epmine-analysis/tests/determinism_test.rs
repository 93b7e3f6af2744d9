//! Re-running the pipeline on identical input yields identical output.

use epmine_analysis::recommend::EpisodeRecommender;
use epmine_analysis::EpisodePipeline;
use epmine_core::{Event, MethodId, MiningConfig, Query};

fn m(i: u32) -> MethodId {
    MethodId::new(format!("[T,P] [T,P].m{i}()"))
}

fn fixture() -> Vec<Event> {
    let inv = |i| Event::invocation(m(i));
    let first_ctx = |i| Event::first_context(m(i));
    let encl_ctx = |i| Event::enclosing_context(m(i));
    vec![
        first_ctx(1), encl_ctx(6), inv(2), inv(3), inv(4),
        first_ctx(1), encl_ctx(7), inv(2), inv(4), inv(3),
        first_ctx(5), encl_ctx(6), inv(3), inv(2),
        first_ctx(1), encl_ctx(8), inv(2), inv(3),
        first_ctx(5), encl_ctx(7), inv(4), inv(2),
    ]
}

#[test]
fn mine_and_reduce_twice_produce_identical_databases() {
    let pipeline = EpisodePipeline::new(MiningConfig::default()).unwrap();

    let first = pipeline.run(&fixture()).unwrap();
    let second = pipeline.run(&fixture()).unwrap();

    assert_eq!(first.stream, second.stream);
    assert_eq!(first.stats, second.stats);
    assert_eq!(first.episodes, second.episodes);
    assert_eq!(first.maximal, second.maximal);
    assert_eq!(first.enclosing, second.enclosing);
}

#[test]
fn proposals_are_stable_across_runs() {
    let pipeline = EpisodePipeline::new(MiningConfig::default()).unwrap();
    let recommender = EpisodeRecommender::new();
    let query = Query::from_raw_facts(&["2"]).unwrap();

    let first = pipeline.run(&fixture()).unwrap();
    let second = pipeline.run(&fixture()).unwrap();

    let proposals_a = recommender.get_proposals(&query, &first.maximal, 5).unwrap();
    let proposals_b = recommender.get_proposals(&query, &second.maximal, 5).unwrap();
    assert_eq!(proposals_a, proposals_b);
}
