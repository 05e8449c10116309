use std::path::Path;
use vocab_progression::ProgressionPath;

pub fn render_progression_report(input: &Path, path: &ProgressionPath) -> String {
    let mut md = String::new();
    md.push_str("# Learning path report\n\n");
    md.push_str(&format!("- Input: `{}`\n", input.display()));
    md.push_str(&format!("- Profile: `{}`\n", path.profile));
    md.push_str(&format!("- Units: `{}`\n", path.units.len()));
    md.push_str(&format!("- Total duration: `{} min`\n\n", path.total_minutes));

    md.push_str("## Units\n\n");
    if path.units.is_empty() {
        md.push_str("No focus area reached the minimum unit size.\n\n");
    } else {
        md.push_str("| # | unit | level | focus | terms | prerequisites | minutes |\n");
        md.push_str("|---:|---|---|---|---|---:|---:|\n");
        for (pos, unit) in path.units.iter().enumerate() {
            let terms = unit.taught_terms().collect::<Vec<_>>().join(", ");
            md.push_str(&format!(
                "| {} | `{}` | {} | {} | {} | {} | {} |\n",
                pos + 1,
                unit.id,
                unit.level,
                escape_cell(&unit.focus_area),
                escape_cell(&truncate_one_line(&terms, 80)),
                unit.prerequisites.len(),
                unit.estimated_minutes,
            ));
        }
        md.push('\n');
    }

    md.push_str("## Review schedule\n\n");
    for review in &path.review_schedule {
        let days = review
            .checkpoints
            .iter()
            .map(|checkpoint| checkpoint.label())
            .collect::<Vec<_>>()
            .join(", ");
        md.push_str(&format!("- `{}`: {}\n", review.unit_id, days));
    }
    if !path.review_schedule.is_empty() {
        md.push('\n');
    }

    md.push_str("## Skill building order\n\n");
    for (pos, skill) in path.skill_order.iter().enumerate() {
        md.push_str(&format!("{}. {}\n", pos + 1, skill));
    }

    md
}

fn truncate_one_line(text: &str, max_chars: usize) -> String {
    let mut s = text.replace(['\n', '\r', '\t'], " ");
    s = s.split_whitespace().collect::<Vec<_>>().join(" ");
    if s.chars().count() <= max_chars {
        return s;
    }
    let truncated: String = s.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{truncated}…")
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}
