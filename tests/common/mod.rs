//! Common test utilities

use chrono::{DateTime, TimeZone, Utc};
use tweetlens::models::Document;

/// Noon UTC on the given September 2025 day
#[allow(dead_code)]
pub fn september(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 9, day, 12, 0, 0).unwrap()
}

/// Create a document with text posted at noon on a September day
#[allow(dead_code)]
pub fn doc(text: &str, day: u32) -> Document {
    Document::with_text(text, september(day))
}

/// Create a document without text
#[allow(dead_code)]
pub fn empty_doc(day: u32) -> Document {
    Document::new(None, september(day))
}

/// Small corpus around an npm supply chain incident
#[allow(dead_code)]
pub fn incident_corpus() -> Vec<Document> {
    vec![
        doc("Malicious npm package found in the registry https://t.co/abc", 8),
        doc("@maintainer the npm worm spreads through package installs", 8),
        doc("Security teams race to patch npm dependencies #npm", 9),
        doc("Supply chain attack hits npm package maintainers", 9),
        doc("Update your dependencies and check every package lock", 11),
        empty_doc(11),
    ]
}

/// CSV export of [`incident_corpus`]-like posts
#[allow(dead_code)]
pub const INCIDENT_CSV: &str = "\
username,created_at,full_text,favorite_count,retweet_count
alice,Mon Sep 08 10:00:00 +0000 2025,Malicious npm package found in the registry,12,3
bob,Mon Sep 08 18:30:00 +0000 2025,the npm worm spreads through package installs,4,1
carol,Tue Sep 09 09:15:00 +0000 2025,Security teams race to patch npm dependencies,7,2
dave,Tue Sep 09 23:59:59 +0000 2025,Supply chain attack hits npm package maintainers,1,0
erin,Thu Sep 11 08:00:00 +0000 2025,Update your dependencies and check every package lock,0,0
frank,Thu Sep 11 09:00:00 +0000 2025,,0,0
gina,Sun Aug 31 23:00:00 +0000 2025,npm before the window,0,0
";
