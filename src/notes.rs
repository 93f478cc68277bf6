//! Note search and small text helpers shared by the page views.

use crate::models::Note;

/// Case-insensitive substring match across title, course, subject and topic.
/// An empty or blank query matches everything.
pub fn matches_query(note: &Note, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }

    [&note.title, &note.course, &note.subject, &note.topic]
        .iter()
        .any(|field| field.to_lowercase().contains(&query))
}

pub fn search_notes<'a>(notes: &'a [Note], query: &str) -> Vec<&'a Note> {
    notes.iter().filter(|n| matches_query(n, query)).collect()
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NoteMeta;

    fn note(title: &str, course: &str, subject: &str, topic: &str) -> Note {
        let meta = NoteMeta {
            course: course.into(),
            subject: subject.into(),
            topic: topic.into(),
            title: Some(title.into()),
        };
        Note::new(&meta, "f.pdf", "/uploads/f.pdf".into())
    }

    #[test]
    fn test_search_across_fields() {
        let notes = vec![
            note("Midterm Review", "CS201", "Data Structures", "Heaps"),
            note("Lab 3", "PHYS110", "Mechanics", "Friction"),
            note("Cheat sheet", "MATH220", "Linear Algebra", "Eigenvalues"),
        ];

        let titles = |q: &str| -> Vec<String> {
            search_notes(&notes, q).iter().map(|n| n.title.clone()).collect()
        };

        assert_eq!(titles("midterm"), vec!["Midterm Review"]);
        assert_eq!(titles("phys"), vec!["Lab 3"]);
        assert_eq!(titles("ALGEBRA"), vec!["Cheat sheet"]);
        assert_eq!(titles("friction"), vec!["Lab 3"]);
        assert_eq!(titles("  ").len(), 3);
        assert!(titles("quantum").is_empty());
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
    }
}
