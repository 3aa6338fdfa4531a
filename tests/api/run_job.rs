//! tests/api/run_job.rs
use std::collections::BTreeMap;

use crate::helpers::{lines, read, run, run_single, Scratch};

#[test]
fn single_shard_scenario() {
    let scratch = Scratch::new();
    scratch.write_input("pets.txt", "the cat sat on the mat\nthe dog sat on the cat\n");

    let out = run_single(&scratch.job("out"));
    assert_eq!(out, "cat\t2\nsat\t2\ndog\t1\nmat\t1\n");
    assert!(scratch.output_dir("out").join("mr-out-0").is_file());
}

#[test]
fn final_output_is_global_top_five() {
    let scratch = Scratch::new();
    scratch.write_input("a.txt", "Rust rust RUST crab crab ferris\nThe borrow checker\n");
    scratch.write_input("b.txt", "rust crab cargo cargo cargo clippy\n");
    scratch.write_input("c.txt", "ferris ferris rust cargo\n");

    let out = run_single(&scratch.job("out"));
    assert_eq!(out, "rust\t5\ncargo\t4\ncrab\t3\nferris\t3\nborrow\t1\n");
}

#[test]
fn word_outside_every_shard_top_five_never_surfaces() {
    let scratch = Scratch::new();
    scratch.write_input(
        "corpus.txt",
        "b b b b c c c c d d d d e e e e f f f f x x x\n\
         g g g g h h h h j j j j k k k k l l l l x x x\n",
    );

    let mut job = scratch.job("top");
    job.shard_lines = lines(1);
    let top = run_single(&job);
    assert_eq!(top, "b\t4\nc\t4\nd\t4\ne\t4\nf\t4\n");
    assert!(!top.contains('x'));

    // The exact count puts "x" first.
    let mut job = scratch.job("exact");
    job.workload = "wc".to_string();
    job.shard_lines = lines(1);
    let exact = run_single(&job);
    assert!(exact.starts_with("x\t6\n"));
}

#[test]
fn word_missing_from_one_shard_and_sixth_in_the_other_never_surfaces() {
    let scratch = Scratch::new();
    scratch.write_input("one.txt", "b b b c c c d d d e e e f f f x x x\n");
    scratch.write_input("two.txt", "g g h\n");

    let top = run_single(&scratch.job("top"));
    assert_eq!(top, "b\t3\nc\t3\nd\t3\ne\t3\nf\t3\n");
    assert!(!top.contains('x'));

    let mut job = scratch.job("exact");
    job.workload = "wc".to_string();
    assert!(run_single(&job).contains("x\t3\n"));
}

#[test]
fn one_shard_per_file_by_default() {
    let scratch = Scratch::new();
    scratch.write_input(
        "corpus.txt",
        "b b b b c c c c d d d d e e e e f f f f x x x\n\
         g g g g h h h h j j j j k k k k l l l l x x x\n",
    );

    // Without splitting the file is one shard, so nothing is lost.
    let out = run_single(&scratch.job("out"));
    assert!(out.starts_with("x\t6\n"));
    assert_eq!(out.lines().count(), 5);
}

#[test]
fn top_k_argument_changes_every_stage() {
    let scratch = Scratch::new();
    scratch.write_input("a.txt", "one one one two two three\n");
    scratch.write_input("b.txt", "three three three four\n");

    let mut job = scratch.job("out");
    job.args = vec!["--top-k".to_string(), "1".to_string()];
    assert_eq!(run_single(&job), "one\t3\n");

    // "three" only counts its occurrence in a.txt once that shard keeps three words.
    job.args = vec!["-k".to_string(), "2".to_string()];
    assert_eq!(run_single(&job), "one\t3\nthree\t3\n");
    job.args = vec!["-k".to_string(), "3".to_string()];
    assert_eq!(run_single(&job), "three\t4\none\t3\ntwo\t2\n");
}

#[test]
fn empty_input_writes_empty_output() {
    let scratch = Scratch::new();
    scratch.write_input("stop.txt", "The THE the and AND of\n");

    assert_eq!(run_single(&scratch.job("out")), "");

    let mut job = scratch.job("none");
    job.input = format!("{}/nothing-here/*", scratch.dir.path().display());
    assert_eq!(run_single(&job), "");
}

#[test]
fn every_reducer_writes_a_file() {
    let scratch = Scratch::new();
    scratch.write_input(
        "words.txt",
        "apple banana cherry date elderberry fig grape honeydew\n\
         apple banana cherry date\napple banana\napple\n",
    );

    let mut job = scratch.job("out");
    job.workload = "wc".to_string();
    job.n_reduce = 3;
    let outputs = run(&job).unwrap();
    assert_eq!(outputs.len(), 3);
    for (i, path) in outputs.iter().enumerate() {
        assert!(path.ends_with(format!("mr-out-{i}")));
    }

    let mut counts = BTreeMap::new();
    for path in &outputs {
        for line in read(path).lines() {
            let (word, count) = line.split_once('\t').unwrap();
            counts.insert(word.to_string(), count.parse::<u64>().unwrap());
        }
    }
    assert_eq!(counts.len(), 8);
    assert_eq!(counts["apple"], 4);
    assert_eq!(counts["banana"], 3);
    assert_eq!(counts["honeydew"], 1);
}

#[test]
fn rerun_is_byte_identical() {
    let scratch = Scratch::new();
    for i in 0..6 {
        let text = (0..200)
            .map(|n| format!("w{} w{} common", (n * 7 + i) % 13, n % 5))
            .collect::<Vec<_>>()
            .join("\n");
        scratch.write_input(&format!("part-{i}.txt"), text);
    }

    let mut job = scratch.job("first");
    job.shard_lines = lines(17);
    let first = run_single(&job);

    job.output = scratch.output_dir("second").to_string_lossy().into_owned();
    job.workers = lines(3);
    let second = run_single(&job);

    assert_eq!(first, second);
    assert!(first.starts_with("common\t"));
    assert_eq!(first.lines().count(), 5);
}

#[test]
fn invalid_arguments_fail_the_job() {
    let scratch = Scratch::new();
    scratch.write_input("a.txt", "cat\n");

    let mut job = scratch.job("out");
    job.args = vec!["--top-k".to_string(), "lots".to_string()];
    assert!(run(&job).is_err());

    let mut job = scratch.job("out");
    job.n_reduce = 0;
    assert!(run(&job).is_err());
}

#[test]
fn invalid_utf8_fails_the_job() {
    let scratch = Scratch::new();
    scratch.write_input("bad.bin", [0xffu8, 0xfe, b' ', b'c']);

    assert!(run(&scratch.job("out")).is_err());

    let mut job = scratch.job("split");
    job.shard_lines = lines(10);
    assert!(run(&job).is_err());
}

#[test]
fn top_words_refuses_more_than_one_reducer() {
    let scratch = Scratch::new();
    scratch.write_input("a.txt", "apple banana cherry date elderberry\n");
    scratch.write_input("b.txt", "fig grape honeydew kiwi lemon\n");

    let mut job = scratch.job("out");
    job.n_reduce = 3;
    let err = run(&job).unwrap_err();
    assert!(err.to_string().contains("exactly one reducer"));
    assert!(!scratch.output_dir("out").exists());

    // One reducer sees both files and keeps a single global top five.
    job.n_reduce = 1;
    let out = run_single(&job);
    assert_eq!(out.lines().count(), 5);
    assert_eq!(out, "apple\t1\nbanana\t1\ncherry\t1\ndate\t1\nelderberry\t1\n");
}
