//! Prompt templates for single-page site generation

pub fn creation_prompt(brief: &str) -> String {
    format!(
        r#"You are an expert web developer. Based on this brief, generate a complete HTML page (index.html):

BRIEF: "{brief}"

Include all required HTML, CSS, and JavaScript in the one file. No explanations, only raw code."#
    )
}

pub fn revision_prompt(brief: &str, existing: &str) -> String {
    format!(
        r#"You are an expert web developer. Modify this HTML according to the following brief: "{brief}"

EXISTING CODE:
{existing}

Return only the full, valid HTML. No explanations or markdown."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creation_prompt_embeds_brief() {
        let prompt = creation_prompt("todo app");
        assert!(prompt.contains(r#"BRIEF: "todo app""#));
        assert!(!prompt.contains("EXISTING CODE"));
    }

    #[test]
    fn test_revision_prompt_embeds_existing_verbatim() {
        let existing = "<html>\n  <body>v1</body>\n</html>";
        let prompt = revision_prompt("make it blue", existing);
        assert!(prompt.contains("make it blue"));
        assert!(prompt.contains(existing));
    }
}
