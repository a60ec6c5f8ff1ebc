//! Prompt templates for commit message generation.

use std::fmt;

use clap::ValueEnum;

/// System instruction sent with every request.
pub const SYSTEM_PROMPT: &str =
    "你是一个专业的Git提交消息生成助手，严格遵循 commit convention";

/// Human language of the generated commit message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Language {
    /// Chinese description/body, English type and scope
    #[default]
    Zh,
    /// English
    En,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Zh => "zh",
            Language::En => "en",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build the user prompt for `diff` in the requested language.
///
/// The diff is embedded verbatim.
pub fn build_commit_prompt(diff: &str, language: Language) -> String {
    match language {
        Language::Zh => format!(
            r#"作为一个Git提交消息生成助手，请根据以下git diff生成一个符合 Conventional Commits 的中文 commit message:
- type 和 scope 使用英文
- description、body 和 footer 使用中文
- 格式: <type>[optional scope]: <description>
- 保持简洁明了

Git Diff:
{diff}

请直接返回 commit message，不要使用 ``` 包围，不要返回任何其他内容。"#
        ),
        Language::En => format!(
            r#"As a Git commit message generator, please generate a commit message following the Conventional Commits standard based on the following git diff:
- Keep the message concise and clear
- Follow the format: <type>[optional scope]: <description>
- Add body and footer if necessary

Git Diff:
{diff}

Please return only the commit message, without any ``` or additional content."#
        ),
    }
}
