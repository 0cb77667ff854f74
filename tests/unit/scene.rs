use super::*;
use crate::draw::recording::{DrawCommand, RecordingContext};
use crate::foundation::core::Point;

fn record(scene: &dyn Scene, width: f64, height: f64, elapsed: f64) -> Vec<DrawCommand> {
    let mut ctx = RecordingContext::default();
    let mut surface = VirtualSurface::new(&mut ctx, width, height);
    scene.render(&mut surface, elapsed);
    ctx.commands().to_vec()
}

fn text_origin(commands: &[DrawCommand], starts_with: &str) -> Option<Point> {
    commands.iter().find_map(|c| match c {
        DrawCommand::Text { text, origin, .. } if text.starts_with(starts_with) => Some(*origin),
        _ => None,
    })
}

fn texts(commands: &[DrawCommand]) -> Vec<&str> {
    commands
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
        .collect()
}

#[test]
fn default_set_covers_twelve_surfaces_with_expected_cycles() {
    let scenes = default_scenes();
    let expected = [
        ("c1", "sources", 4),
        ("c2", "ingestion", 4),
        ("c3", "preprocess", 6),
        ("c4", "chunking", 8),
        ("c5", "embedding", 4),
        ("c6", "vector_store", 4),
        ("c7", "query", 8),
        ("c8", "similarity", 10),
        ("c9", "rerank", 12),
        ("c10", "prompt", 5),
        ("c11", "generation", 12),
        ("c12", "answer", 6),
    ];
    assert_eq!(scenes.len(), expected.len());
    for ((id, scene), (want_id, want_name, secs)) in scenes.iter().zip(expected) {
        assert_eq!(id.as_str(), want_id);
        assert_eq!(scene.name(), want_name);
        assert_eq!(scene.cycle(), Cycle::seconds(secs));
    }
    assert!(scene_for(&SurfaceId::from("c9")).is_some());
    assert!(scene_for(&SurfaceId::from("c13")).is_none());
}

#[test]
fn every_scene_repeats_after_one_cycle() {
    for (id, scene) in default_scenes() {
        let period = scene.cycle().period();
        // dyadic sample times keep `t` and `t + period` bit-identical after the modulo
        for k in 0..24 {
            let t = f64::from(k) * 0.375 + 0.0625;
            let a = record(scene.as_ref(), 860.0, 360.0, t);
            let b = record(scene.as_ref(), 860.0, 360.0, t + period);
            let c = record(scene.as_ref(), 860.0, 360.0, t + 3.0 * period);
            assert_eq!(a, b, "{id} differs at t={t}");
            assert_eq!(a, c, "{id} differs at t={t} (three cycles)");
        }
    }
}

#[test]
fn every_scene_draws_at_reference_size() {
    for (id, scene) in default_scenes() {
        for t in [1.5, 3.25] {
            let cmds = record(scene.as_ref(), 860.0, 240.0, t);
            assert!(!cmds.is_empty(), "{id} drew nothing at t={t}");
        }
    }
}

#[test]
fn prompt_starts_each_loop_blank() {
    assert!(record(&prompt::Prompt, 860.0, 240.0, 0.0).is_empty());
    assert!(record(&prompt::Prompt, 860.0, 240.0, 5.0).is_empty());
    assert!(!record(&prompt::Prompt, 860.0, 240.0, 0.5).is_empty());
}

#[test]
fn degenerate_surfaces_draw_nothing() {
    for (id, scene) in default_scenes() {
        for (w, h) in [
            (0.0, 200.0),
            (860.0, 0.0),
            (-10.0, 200.0),
            (f64::NAN, 200.0),
            (860.0, f64::INFINITY),
        ] {
            assert!(record(scene.as_ref(), w, h, 1.0).is_empty(), "{id} drew on {w}x{h}");
        }
    }
}

#[test]
fn scenes_tolerate_tiny_surfaces() {
    for (_, scene) in default_scenes() {
        let _ = record(scene.as_ref(), 1.0, 1.0, 2.5);
    }
}

#[test]
fn eight_point_three_seconds_is_phase_point_three_of_chunking() {
    let scene = Chunking;
    let t = scene.cycle().at(8.3);
    assert!((t.phase() - 0.3).abs() < 1e-9);
    assert_eq!(
        record(&scene, 860.0, 200.0, 8.25),
        record(&scene, 860.0, 200.0, 0.25)
    );
}

#[test]
fn rerank_oscillates_between_encoder_orders() {
    let cycle = Rerank.cycle();
    assert!((rerank::reorder_progress(&cycle.at(0.0)) - 0.5).abs() < 1e-9);
    assert!((rerank::reorder_progress(&cycle.at(1.5)) - 1.0).abs() < 1e-9);
    assert!(rerank::reorder_progress(&cycle.at(4.5)).abs() < 1e-9);

    // "Consulting" is third by bi-encoder score and second after cross-encoding.
    let at_bi = record(&Rerank, 860.0, 200.0, 4.5);
    let at_cross = record(&Rerank, 860.0, 200.0, 1.5);
    let y_bi = text_origin(&at_bi, "Consulting").unwrap().y;
    let y_cross = text_origin(&at_cross, "Consulting").unwrap().y;
    assert!((y_bi - (28.0 + 2.0 * 32.0 + 16.0)).abs() < 1e-6);
    assert!((y_cross - (28.0 + 32.0 + 16.0)).abs() < 1e-6);
}

#[test]
fn rerank_badges_follow_cross_encoder_rank() {
    let cmds = record(&Rerank, 860.0, 200.0, 1.5);
    let badges: Vec<&str> = texts(&cmds)
        .into_iter()
        .filter(|t| t.starts_with('#'))
        .collect();
    assert_eq!(badges, ["#1", "#2", "#3", "#4", "#5"]);
}

#[test]
fn query_types_the_question_progressively() {
    let early = record(&Query, 860.0, 220.0, 2.0);
    assert!(texts(&early).contains(&"> What servi"));
    assert!(!texts(&early).iter().any(|t| t.contains("QueryExpander")));

    let late = record(&Query, 860.0, 220.0, 7.75);
    let all = texts(&late);
    assert!(all.contains(&"> What services does Aseuro offer?"));
    assert!(all.iter().any(|t| t.contains("QueryExpander")));
    assert!(all.iter().any(|t| t.starts_with("q_vec1")));
}

#[test]
fn generation_decodes_all_tokens_within_the_cycle() {
    let cycle = Generation.cycle();
    assert_eq!(generation::decoded_tokens(&cycle.at(0.0)), 0);
    assert_eq!(generation::decoded_tokens(&cycle.at(1.0)), 2);
    let total = generation::RESPONSE.split_whitespace().count();
    assert_eq!(generation::decoded_tokens(&cycle.at(11.9)), total);

    let cmds = record(&Generation, 860.0, 360.0, 11.5);
    let counter = format!("{total}/{total} tokens");
    assert!(texts(&cmds).contains(&counter.as_str()));
}

#[test]
fn ingestion_lights_one_more_stage_each_second() {
    let count_done = |t: f64| {
        texts(&record(&Ingestion, 860.0, 180.0, t))
            .iter()
            .filter(|s| s.starts_with('\u{2713}'))
            .count()
    };
    assert_eq!(count_done(0.5), 1);
    assert_eq!(count_done(1.5), 2);
    assert_eq!(count_done(3.5), 4);
}

#[test]
fn chunking_reveals_cards_after_the_blade() {
    let before = record(&Chunking, 860.0, 200.0, 1.5);
    assert!(!texts(&before).iter().any(|t| t.starts_with("Chunk ")));
    let after = record(&Chunking, 860.0, 200.0, 5.0);
    let titles = texts(&after)
        .into_iter()
        .filter(|t| t.starts_with("Chunk "))
        .count();
    assert_eq!(titles, 4);
    assert!(texts(&after).contains(&"\u{2713} 4/4 chunks created"));
}

#[test]
fn scenes_leave_the_state_stack_balanced() {
    for (id, scene) in default_scenes() {
        let mut ctx = RecordingContext::default();
        let mut surface = VirtualSurface::new(&mut ctx, 860.0, 300.0);
        scene.render(&mut surface, 2.25);
        assert_eq!(ctx.states().depth(), 0, "{id}");
    }
}
