use crate::changelog::ReleaseNotes;

pub fn format_markdown(repository: &str, releases: &[ReleaseNotes]) -> String {
    let mut out = String::new();
    out.push_str("# Changelog\n\n");
    out.push_str(&format!("_{repository}_\n\n"));

    if releases.is_empty() {
        out.push_str("_No releases found._\n");
        return out;
    }

    for release in releases {
        out.push_str(&format!(
            "## [{}]({}) ({})\n\n",
            release.tag_name,
            release.html_url,
            release.published_at.date_naive()
        ));

        if release.is_empty() {
            out.push_str("_No changes._\n\n");
            continue;
        }

        for (category, issues) in release.issues.iter().filter(|(_, issues)| !issues.is_empty()) {
            out.push_str(&format!("**{}:**\n\n", category.section_label()));
            for issue in issues {
                out.push_str(&format!(
                    "- {} [#{}]({})\n",
                    escape_title(&issue.title),
                    issue.number,
                    issue.html_url
                ));
            }
            out.push('\n');
        }
    }

    out
}

fn escape_title(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    for ch in title.trim().chars() {
        if matches!(ch, '[' | ']' | '*' | '_' | '`' | '<' | '>') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}
