//! Edge case tests for chatlens
//!
//! These tests cover malformed exports, unusual line formats and the
//! "not enough data" paths of the dashboard.

use chatlens::error::ParseErrorKind;
use chatlens::parser::SkippedLine;
use chatlens::prelude::*;

fn session(export: &str) -> Session {
    Session::from_text("chat.txt", export, AnalysisConfig::default()).unwrap()
}

// =========================================================================
// Empty and invalid input
// =========================================================================

#[test]
fn test_empty_export() {
    let s = session("");
    assert!(s.records().is_empty());
    assert!(s.users().is_empty());
    assert_eq!(s.format(), None);
    assert_eq!(s.filter_options(), vec!["Overall"]);

    let d = s.dashboard(&UserFilter::Overall).unwrap();
    assert_eq!(d.stats.message_count, 0);
    assert!(d.monthly.is_empty());
    assert!(d.heatmap.is_insufficient());
    assert!(d.word_cloud.is_insufficient());
    assert!(d.sentiment.is_insufficient());
}

#[test]
fn test_whitespace_only_export() {
    let s = session("\n   \n\t\n");
    assert!(s.records().is_empty());
    assert!(s.report().is_clean());
}

#[test]
fn test_not_a_whatsapp_export() {
    let err = Session::from_text(
        "notes.txt",
        "Shopping list\n- milk\n- bread\n",
        AnalysisConfig::default(),
    )
    .unwrap_err();
    assert!(err.is_invalid_format());
    assert!(err.to_string().contains("Could not detect"));
}

#[test]
fn test_invalid_utf8_upload() {
    let err = Session::from_upload("chat.txt", vec![0x30, 0xff, 0xfe, 0x0a], AnalysisConfig::default())
        .unwrap_err();
    assert!(matches!(err, ChatlensError::Utf8 { .. }));
    assert!(err.to_string().contains("UTF-8"));
}

#[test]
fn test_missing_file() {
    let err = Session::open("definitely/not/here.txt", AnalysisConfig::default()).unwrap_err();
    assert!(err.is_io());
}

// =========================================================================
// Line handling
// =========================================================================

#[test]
fn test_bom_and_crlf() {
    let s = session("\u{feff}01/01/24, 10:00 - Alice: Hi\r\n01/01/24, 10:01 - Bob: Hey\r\n");
    assert_eq!(s.records().len(), 2);
    assert_eq!(s.records()[0].user, "Alice");
    assert_eq!(s.records()[1].message, "Hey");
}

#[test]
fn test_direction_marks_ios() {
    let s = session("\u{200e}[15.01.24, 10:30:45] Alice: Hallo\n\u{200e}[15.01.24, 10:31:00] Bob: Servus\n");
    assert_eq!(s.users(), ["Alice", "Bob"]);
}

#[test]
fn test_orphan_first_line() {
    let s = session("exported from my phone\n01/01/24, 10:00 - Alice: Hi\n");
    assert_eq!(s.records().len(), 1);
    assert_eq!(
        s.report().skipped,
        vec![SkippedLine {
            line: 1,
            reason: ParseErrorKind::Orphan
        }]
    );
}

#[test]
fn test_malformed_date_drops_its_continuation() {
    let export = "\
13/01/24, 10:00 - Alice: first
32/01/24, 10:05 - Bob: impossible date
still part of the impossible message
14/01/24, 09:00 - Alice: second
continued";
    let s = session(export);

    assert_eq!(s.records().len(), 2);
    assert_eq!(s.records()[1].message, "second\ncontinued");

    let skipped = &s.report().skipped;
    assert_eq!(skipped.len(), 2);
    assert_eq!(skipped[0].line, 2);
    assert!(matches!(skipped[0].reason, ParseErrorKind::Date(_)));
    assert_eq!(skipped[1].line, 3);
    assert_eq!(skipped[1].reason, ParseErrorKind::Orphan);

    assert_eq!(s.file_review().skipped_lines, 2);
}

#[test]
fn test_out_of_order_line_skipped() {
    let export = "\
02/01/24, 10:00 - Alice: later
01/01/24, 10:00 - Bob: earlier
02/01/24, 10:00 - Alice: same minute";
    let s = session(export);

    assert_eq!(s.records().len(), 2);
    assert!(s.records().windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    assert!(matches!(
        s.report().skipped[0].reason,
        ParseErrorKind::OutOfOrder(_)
    ));

    let err = s.report().skipped[0].to_error();
    assert!(err.is_parse());
    assert!(err.to_string().contains("line 2"));
}

#[test]
fn test_narrow_no_break_space_time() {
    let s = session("1/15/24, 9:05\u{202f}PM - Bob: hi\n1/15/24, 9:07\u{202f}p.m. - Ann: yo\n");
    assert_eq!(s.records().len(), 2);
    assert_eq!(s.records()[0].hour, 21);
    assert_eq!(s.records()[0].date.to_string(), "2024-01-15");
}

#[test]
fn test_date_time_separators() {
    let s = session("15/01/24,10:00 - Alice: comma\n15/01/24 10:01 - Bob: space\n15/01/24, 10:02 - Ann: both\n");
    assert_eq!(s.records().len(), 3);
    assert!(s.report().is_clean());
}

#[test]
fn test_year_widths() {
    let short = session("31/12/69, 23:59 - Alice: party\n");
    assert_eq!(short.records()[0].year, 1969);

    let long = session("31/12/2068, 23:59 - Alice: party\n");
    assert_eq!(long.records()[0].year, 2068);
    assert_eq!(long.records()[0].period(), "23-00");
}

#[test]
fn test_ambiguous_dates_default_day_first() {
    let s = session("03/04/24, 10:00 - Alice: hi\n");
    assert_eq!(s.records()[0].month, "April");

    let config = AnalysisConfig::default().with_parser(ParserConfig::default().with_day_first(false));
    let s = Session::from_text("chat.txt", "03/04/24, 10:00 - Alice: hi\n", config).unwrap();
    assert_eq!(s.records()[0].month, "March");
}

#[test]
fn test_colon_in_notification_body_without_space() {
    let s = session("01/01/24, 10:00 - Alice changed the subject to \"10:30 meetup\"\n");
    assert!(s.records()[0].is_notification());
    assert!(s.users().is_empty());
}

// =========================================================================
// Insufficient data
// =========================================================================

#[test]
fn test_unknown_user() {
    let s = session("01/01/24, 10:00 - Alice: Hi\n");
    let err = s.dashboard(&UserFilter::user("alice")).unwrap_err();
    assert_eq!(err.to_string(), "Unknown user 'alice'");
}

#[test]
fn test_overall_filter_case_insensitive() {
    let filter: UserFilter = "OVERALL".parse().unwrap();
    assert_eq!(filter, UserFilter::Overall);
}

#[test]
fn test_media_only_user() {
    let s = session("01/01/24, 10:00 - Alice: Hello friends\n01/01/24, 10:01 - Bob: <Media omitted>\n");
    let d = s.dashboard(&UserFilter::user("Bob")).unwrap();

    assert_eq!(d.stats.media_count, 1);
    assert_eq!(d.stats.word_count, 0);
    assert!(d.common_words.is_empty());
    assert!(d.word_cloud.is_insufficient());
    assert!(d.sentiment.is_insufficient());
    assert!(d.heatmap.is_ready());
    assert_eq!(d.emoji_sequence.as_deref(), Some(&[][..]));
}

#[test]
fn test_media_with_caption() {
    let s = session("01/01/24, 10:00 - Bob: hello friends\n01/01/24, 10:01 - Alice: <Media omitted>\ncaption here\n");
    let d = s.dashboard(&UserFilter::Overall).unwrap();

    assert_eq!(d.stats.media_count, 1);
    assert_eq!(d.stats.word_count, 2);
    let words: Vec<_> = d.common_words.iter().map(|w| w.word.as_str()).collect();
    assert!(!words.contains(&"media"));
    assert!(!words.contains(&"omitted"));

    let alice = s.dashboard(&UserFilter::user("Alice")).unwrap();
    assert!(alice.sentiment.is_insufficient());
}

#[test]
fn test_stopwords_only_messages() {
    let s = session("01/01/24, 10:00 - Alice: the and of\n01/01/24, 10:01 - Bob: it is what it is\n");
    let d = s.dashboard(&UserFilter::Overall).unwrap();

    assert!(d.common_words.is_empty());
    match &d.word_cloud {
        Outcome::InsufficientData { reason } => assert!(!reason.is_empty()),
        Outcome::Ready(_) => panic!("word cloud from stopwords only"),
    }
}

#[test]
fn test_single_day_sentiment_timeline() {
    let s = session("01/01/24, 10:00 - Alice: great news\n01/01/24, 18:00 - Bob: terrible news\n");
    let d = s.dashboard(&UserFilter::Overall).unwrap();
    let sentiment = d.sentiment.ready().unwrap();

    assert_eq!(sentiment.summary.positive, 1);
    assert_eq!(sentiment.summary.negative, 1);
    assert!(sentiment.timeline.is_insufficient());
}

#[test]
fn test_heatmap_threshold() {
    let config = AnalysisConfig::default()
        .with_activity(ActivityConfig::default().with_heatmap_min_records(3));
    let s = Session::from_text(
        "chat.txt",
        "01/01/24, 10:00 - Alice: a\n01/01/24, 11:00 - Bob: b\n",
        config,
    )
    .unwrap();
    let d = s.dashboard(&UserFilter::Overall).unwrap();
    assert!(d.heatmap.is_insufficient());
}

// =========================================================================
// Emoji and Unicode
// =========================================================================

#[test]
fn test_skin_tone_counted_separately() {
    let s = session("01/01/24, 10:00 - Alice: 👍🏽 👍\n");
    let d = s.dashboard(&UserFilter::Overall).unwrap();

    let counts: Vec<_> = d.emojis.iter().map(|e| (e.emoji.as_str(), e.count)).collect();
    assert_eq!(counts, vec![("👍", 2), ("🏽", 1)]);
}

#[test]
fn test_unicode_senders_and_words() {
    let s = session("01/01/24, 10:00 - Иван: Привет мир\n01/01/24, 10:01 - 村上: こんにちは\n");
    assert_eq!(s.users(), ["Иван", "村上"]);

    let d = s.dashboard(&UserFilter::user("Иван")).unwrap();
    let words: Vec<_> = d.common_words.iter().map(|w| w.word.as_str()).collect();
    assert_eq!(words, vec!["привет", "мир"]);
}

#[test]
fn test_sender_with_phone_number() {
    let s = session("01/01/24, 10:00 - +91 98765 43210: call me\n");
    assert_eq!(s.users(), ["+91 98765 43210"]);
}
