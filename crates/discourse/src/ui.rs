//! Console output for the discourse CLI.

use colored::Colorize;

use discourse::analysis::Bucket;
use discourse::report::FrameTotal;
use discourse::{CorpusSummary, EventReport, GroupedSummary, Lexicon};

/// Print a section header.
pub fn print_section(title: &str) {
    println!();
    println!("{}", "═".repeat(70).bright_black());
    println!("{}", title.cyan().bold());
    println!("{}", "═".repeat(70).bright_black());
}

/// Print a sub-section header.
pub fn print_subsection(title: &str) {
    println!();
    println!("{}", format!("--- {title} ---").bold());
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message.green());
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message.yellow());
}

/// Print a step indicator with message.
pub fn print_step(message: &str) {
    println!("{} {}", "▶".cyan(), message.bold());
}

/// `la_casta` -> `La Casta`.
pub fn title_case(label: &str) -> String {
    label
        .split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

fn print_frames(frames: &[FrameTotal]) {
    for frame in frames {
        println!("  {}: {}", title_case(&frame.frame), frame.total);
    }
}

/// Print the whole-corpus summary.
pub fn print_corpus_summary(summary: &CorpusSummary) {
    print_section("ANALYSIS SUMMARY");
    println!("Total tweets analyzed: {}", summary.tweets);
    match (summary.first_posted, summary.last_posted) {
        (Some(first), Some(last)) => println!(
            "Date range: {} to {}",
            first.format("%Y-%m-%d %H:%M:%S"),
            last.format("%Y-%m-%d %H:%M:%S")
        ),
        _ => println!("Date range: n/a"),
    }
    if summary.undated > 0 {
        print_warning(&format!(
            "{} tweets have no usable timestamp and are left out of time groups",
            summary.undated
        ));
    }

    println!();
    println!(
        "Tweets with security frames: {} ({:.1}%)",
        summary.with_security_frames,
        summary.security_share * 100.0
    );
    println!("Average security intensity: {:.2}", summary.mean_intensity);
    println!("Total security intensity: {}", summary.total_intensity);

    for (title, bucket) in [
        ("ENEMY CATEGORIES", Bucket::Enemy),
        ("ECONOMIC FRAMES", Bucket::Economic),
    ] {
        print_subsection(title);
        let frames: Vec<FrameTotal> = summary
            .frames
            .iter()
            .filter(|f| f.bucket == bucket)
            .cloned()
            .collect();
        print_frames(&frames);
    }

    print_subsection("OTHER FRAMES");
    println!(
        "  War/Military Language: {}",
        summary.bucket_total(Bucket::War)
    );
    println!("  Liberty Frames: {}", summary.bucket_total(Bucket::Liberty));
}

/// Print a grouped summary as a table.
pub fn print_grouped(title: &str, grouped: &GroupedSummary) {
    print_subsection(title);
    if grouped.groups.is_empty() {
        println!("  No dated tweets.");
        return;
    }
    println!(
        "  {:<10} {:>7} {:>10} {:>8} {:>8} {:>8} {:>8} {:>12}",
        "group".bold(),
        "tweets".bold(),
        "mean".bold(),
        "sum".bold(),
        "enemy".bold(),
        "econ".bold(),
        "war".bold(),
        "engagement".bold()
    );
    for g in &grouped.groups {
        println!(
            "  {:<10} {:>7} {:>10.2} {:>8} {:>8.2} {:>8.2} {:>8.2} {:>12}",
            g.label,
            g.tweets,
            g.intensity_mean,
            g.intensity_sum,
            g.enemy_mean,
            g.economic_mean,
            g.war_mean,
            g.engagement_sum
        );
    }
    if grouped.excluded > 0 {
        println!(
            "  {}",
            format!("({} undated tweets excluded)", grouped.excluded).bright_black()
        );
    }
}

/// Print an event window report.
pub fn print_event(report: &EventReport) {
    print_section(&format!("EVENT ANALYSIS: {}", report.name));
    println!("Period: {} to {}", report.start, report.end);
    println!("Total tweets: {}", report.tweets);
    println!("Average security intensity: {:.2}", report.mean_intensity);
    match report.mean_engagement {
        Some(mean) => println!("Average engagement: {mean:.0}"),
        None => println!("Average engagement: n/a"),
    }

    print_subsection("Top enemy categories");
    print_frames(&report.enemy_frames);
    print_subsection("Top economic frames");
    print_frames(&report.economic_frames);
}

/// Print the frames and keywords of a lexicon.
pub fn print_lexicon(lexicon: &Lexicon) {
    print_section("LEXICON");
    for bucket in Bucket::all() {
        let scored = if bucket.is_scored() {
            String::new()
        } else {
            " (not scored)".bright_black().to_string()
        };
        println!();
        println!("{}{scored}", bucket.to_string().to_uppercase().bold());
        println!("  {}", bucket.description().bright_black());
        for frame in lexicon.frames_in(*bucket) {
            println!(
                "  {} {}: {}",
                "▸".cyan(),
                frame.name.bold(),
                frame.keywords.join(", ")
            );
        }
    }
    println!();
    println!(
        "{} frames, {} keywords",
        lexicon.frames().len(),
        lexicon.keyword_count()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("la_casta"), "La Casta");
        assert_eq!(title_case("war_language"), "War Language");
        assert_eq!(title_case("media"), "Media");
    }
}
