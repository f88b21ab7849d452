use crate::domain::Commit;
use console::style;

pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

pub fn display_status(message: &str) {
    eprintln!("{} {}", style("→").yellow(), message);
}

/// One line per commit: short hash, date, subject, then any tag names.
pub fn format_commit_line(commit: &Commit) -> String {
    let mut line = format!(
        "{} {} {}",
        commit.short_hash(),
        commit.committer_date.format("%Y-%m-%d"),
        commit.subject()
    );

    let tags = commit.tag_names();
    if !tags.is_empty() {
        line.push_str(&format!(" [{}]", tags.join(", ")));
    }
    line
}

pub fn display_commits(commits: &[Commit], dir: &str) {
    display_status(&format!("{} commit(s) touching '{}'", commits.len(), dir));

    for commit in commits {
        let line = format_commit_line(commit);
        match line.split_once(' ') {
            Some((hash, rest)) => println!("{} {}", style(hash).yellow(), rest),
            None => println!("{}", line),
        }
    }
}

pub fn display_tags(tags: &[String], branch: &str) {
    display_status(&format!("{} tag(s) merged into '{}'", tags.len(), branch));

    for tag in tags {
        println!("{}", tag);
    }
}
