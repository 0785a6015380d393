#![no_main]

use gitgossip_git::DiffSettings;
use gitgossip_git::summarizer::summarize_diff;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);

    let summary = summarize_diff("fuzz.py", &text);
    assert!(summary.summary.len() <= summary.hunks.len());

    let _ = DiffSettings::default().file_change("fuzz.py", &text);
});
