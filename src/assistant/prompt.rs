use crate::registry::{CommandRegistry, BIN_NAME};

/// Prefix that marks a conversational answer.
pub const CHAT_MARKER: &str = "CHAT:";

pub const COMMAND_EXAMPLE_REQUEST: &str = "create a python file called app.py that prints hello";
pub const COMMAND_EXAMPLE_OUTPUT: &str = "create-file app.py --content \"print('Hello, World!')\"";
pub const CHAT_EXAMPLE_REQUEST: &str = "what is python";
pub const CHAT_EXAMPLE_OUTPUT: &str = "CHAT: Python is a high-level, interpreted programming language...";

pub fn build_prompt(registry: &CommandRegistry, query: &str) -> String {
    format!(
        r#"You are 'Vox', an assistant built into the command-line tool `{bin}`.
You have two modes: Command Translation and Conversational.

1. **Command Translation Mode:** If the user's request can be fulfilled by one of the `{bin}` commands below, your ONLY output MUST be that command on a single line. Do not add explanations, code fences or the program name. Write line breaks inside `--content` as \n.

2. **Conversational Mode:** For any other request, your response MUST start with `{marker} ` followed by a Markdown-formatted answer.

**Available `{bin}` commands:**
{catalog}

**CRITICAL EXAMPLES:**
User request: "{cmd_req}"
Your output: {cmd_out}

User request: "{chat_req}"
Your output: {chat_out}
---
Now, process the following user request: "{query}"
Your output:
"#,
        bin = BIN_NAME,
        marker = CHAT_MARKER,
        catalog = registry.render_catalog(),
        cmd_req = COMMAND_EXAMPLE_REQUEST,
        cmd_out = COMMAND_EXAMPLE_OUTPUT,
        chat_req = CHAT_EXAMPLE_REQUEST,
        chat_out = CHAT_EXAMPLE_OUTPUT,
        query = query,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Invocation;

    #[test]
    fn test_prompt_contains_catalog_and_request() {
        let registry = CommandRegistry::builtin();
        let prompt = build_prompt(&registry, "show me notes.txt");

        assert!(prompt.contains(&registry.render_catalog()));
        assert!(prompt.contains("Now, process the following user request: \"show me notes.txt\""));
        assert!(prompt.contains("Command Translation Mode"));
        assert!(prompt.contains("Conversational Mode"));
        assert!(prompt.contains("`CHAT: `"));
    }

    #[test]
    fn test_command_example_is_a_valid_invocation() {
        let registry = CommandRegistry::builtin();
        assert_eq!(
            registry.parse_line(COMMAND_EXAMPLE_OUTPUT).unwrap(),
            Invocation::CreateFile {
                filepath: "app.py".into(),
                content: "print('Hello, World!')".to_string(),
            }
        );
        assert!(CHAT_EXAMPLE_OUTPUT.starts_with(CHAT_MARKER));
    }
}
