//! Plain-text report.

use crate::analysis::Outcome;
use crate::record::WEEKDAYS;
use crate::session::{Dashboard, FileReview};

const BAR_WIDTH: usize = 30;
const HEATMAP_SHADES: [char; 5] = [' ', '░', '▒', '▓', '█'];

fn section(out: &mut String, title: &str) {
    out.push_str(&format!("\n{title}\n{}\n", "-".repeat(title.chars().count())));
}

fn bar(count: usize, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    "#".repeat((count * BAR_WIDTH).div_ceil(max))
}

fn outcome<T>(out: &mut String, view: &Outcome<T>, render: impl FnOnce(&mut String, &T)) {
    match view {
        Outcome::Ready(value) => render(out, value),
        Outcome::InsufficientData { reason } => out.push_str(&format!("  (not enough data: {reason})\n")),
    }
}

/// File name, size, message count and a preview of the first records.
pub fn render_file_review(review: &FileReview<'_>) -> String {
    let mut out = String::new();
    section(&mut out, "File");
    out.push_str(&format!("  Name:           {}\n", review.name));
    out.push_str(&format!("  Size:           {:.2} KB\n", review.size_kb));
    out.push_str(&format!("  Total messages: {}\n", review.total_messages));
    if review.skipped_lines > 0 {
        out.push_str(&format!("  Skipped lines:  {}\n", review.skipped_lines));
    }
    for record in review.preview {
        out.push_str(&format!(
            "  {} {}: {}\n",
            record.timestamp.format("%Y-%m-%d %H:%M"),
            record.user,
            record.message.replace('\n', " ")
        ));
    }
    out
}

/// The filter choices, `Overall` first.
pub fn render_users(options: &[String]) -> String {
    options.iter().map(|u| format!("{u}\n")).collect()
}

/// Full dashboard report.
pub fn render_dashboard(review: &FileReview<'_>, d: &Dashboard<'_>) -> String {
    let mut out = render_file_review(review);

    section(&mut out, &format!("Statistics ({})", d.filter));
    out.push_str(&format!("  Total messages: {}\n", d.stats.message_count));
    out.push_str(&format!("  Total words:    {}\n", d.stats.word_count));
    out.push_str(&format!("  Media shared:   {}\n", d.stats.media_count));
    out.push_str(&format!("  Links shared:   {}\n", d.stats.link_count));

    section(&mut out, "Monthly timeline");
    let max = d.monthly.iter().map(|p| p.count).max().unwrap_or(0);
    for p in &d.monthly {
        out.push_str(&format!("  {:<15} {:>6} {}\n", p.label, p.count, bar(p.count, max)));
    }

    section(&mut out, "Daily timeline");
    let max = d.daily.iter().map(|p| p.count).max().unwrap_or(0);
    for p in &d.daily {
        out.push_str(&format!("  {} {:>6} {}\n", p.date, p.count, bar(p.count, max)));
    }

    section(&mut out, "Busiest days");
    for n in &d.busiest_days {
        out.push_str(&format!("  {:<10} {:>6}\n", n.name, n.count));
    }

    section(&mut out, "Busiest months");
    for n in &d.busiest_months {
        out.push_str(&format!("  {:<10} {:>6}\n", n.name, n.count));
    }

    section(&mut out, "Weekly activity map");
    outcome(&mut out, &d.heatmap, |out, heatmap| {
        out.push_str("            0         1         2   \n");
        out.push_str("            012345678901234567890123\n");
        let max = heatmap.max();
        for (i, day) in WEEKDAYS.iter().enumerate() {
            let cells: String = (0..24)
                .map(|h| {
                    let count = heatmap.get(i, h);
                    let shade = if count == 0 || max == 0 {
                        0
                    } else {
                        1 + (count * (HEATMAP_SHADES.len() - 2)) / max
                    };
                    HEATMAP_SHADES[shade.min(HEATMAP_SHADES.len() - 1)]
                })
                .collect();
            out.push_str(&format!("  {day:<9} {cells}\n"));
        }
    });

    section(&mut out, "Word cloud");
    outcome(&mut out, &d.word_cloud, |out, cloud| {
        let words: Vec<_> = cloud.words.iter().take(15).map(|w| w.word.as_str()).collect();
        out.push_str(&format!("  {} ({} words)\n", words.join(" "), cloud.total_tokens));
    });

    section(&mut out, "Most common words");
    if d.common_words.is_empty() {
        out.push_str("  (none)\n");
    }
    for w in &d.common_words {
        out.push_str(&format!("  {:<20} {:>6}\n", w.word, w.count));
    }

    section(&mut out, "Emoji");
    if d.emojis.is_empty() {
        out.push_str("  (none)\n");
    }
    for e in &d.emojis {
        out.push_str(&format!("  {} {:>6}\n", e.emoji, e.count));
    }
    if let Some(sequence) = &d.emoji_sequence {
        out.push_str(&format!("  Sequence: {}\n", sequence.concat()));
    }

    section(&mut out, "Sentiment");
    outcome(&mut out, &d.sentiment, |out, s| {
        let summary = &s.summary;
        out.push_str(&format!(
            "  Positive: {}  Negative: {}  Neutral: {}  (average polarity {:+.3})\n",
            summary.positive, summary.negative, summary.neutral, summary.avg_polarity
        ));

        if !s.concerning.is_empty() {
            out.push_str("\n  Concerning messages:\n");
            for c in &s.concerning {
                out.push_str(&format!(
                    "  {:+.3} {} {}: {}\n",
                    c.polarity,
                    c.record.timestamp.format("%Y-%m-%d %H:%M"),
                    c.record.user,
                    c.record.message.replace('\n', " ")
                ));
            }
        }

        for (label, words) in [
            ("positive", &s.keywords.positive),
            ("negative", &s.keywords.negative),
            ("neutral", &s.keywords.neutral),
        ] {
            if !words.is_empty() {
                let list: Vec<_> = words.iter().map(|w| format!("{} ({})", w.word, w.count)).collect();
                out.push_str(&format!("  Top {label} words: {}\n", list.join(", ")));
            }
        }

        out.push_str("\n  Daily polarity:\n");
        outcome(out, &s.timeline, |out, days| {
            for day in days {
                out.push_str(&format!("  {} {:+.3} ({} messages)\n", day.date, day.avg_polarity, day.messages));
            }
        });
    });

    out
}
