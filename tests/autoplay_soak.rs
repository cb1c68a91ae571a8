use type_rangers::autoplay::TypistProfile;
use type_rangers::config::GameConfig;
use type_rangers::soak::{run_once, run_soak, SoakOptions};
use type_rangers::words::{WordDifficulty, WordPools};

fn options() -> SoakOptions {
    SoakOptions {
        runs: 4,
        base_seed: 100,
        max_secs: 90,
        frame_ms: 20,
        typist: TypistProfile::default(),
    }
}

#[test]
fn soak_is_reproducible() {
    let pools = WordPools::embedded().unwrap();
    let config = GameConfig::default();

    let first = run_soak(&config, &pools, &options()).unwrap();
    let second = run_soak(&config, &pools, &options()).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.runs.len(), 4);
}

#[test]
fn faster_typists_survive_longer() {
    let pools = WordPools::embedded().unwrap();
    let config = GameConfig::default();
    let slow = SoakOptions {
        typist: TypistProfile {
            chars_per_second: 1.0,
            error_rate: 0.0,
            ..TypistProfile::default()
        },
        ..options()
    };
    let fast = SoakOptions {
        typist: TypistProfile {
            chars_per_second: 20.0,
            error_rate: 0.0,
            ..TypistProfile::default()
        },
        ..options()
    };

    let slow = run_soak(&config, &pools, &slow).unwrap();
    let fast = run_soak(&config, &pools, &fast).unwrap();

    assert!(fast.mean_score > slow.mean_score);
    assert!(fast.mean_survived_secs >= slow.mean_survived_secs);
}

#[test]
fn short_words_are_playable() {
    let pools = WordPools::embedded().unwrap();
    let config = GameConfig {
        spawn_difficulty: WordDifficulty::Short,
        ..GameConfig::default()
    };

    let report = run_once(&config, &pools, &options(), 0).unwrap();

    assert!(report.words_typed > 0);
    assert!(report.score >= 10 * report.words_typed as u64);
}

#[test]
fn game_clock_never_outruns_the_session() {
    let pools = WordPools::embedded().unwrap();
    let report = run_once(&GameConfig::default(), &pools, &options(), 1).unwrap();

    assert!(report.elapsed_seconds as u64 * 1000 <= report.survived_ms);
    assert!(report.survived_ms <= 90_000);
}
