use std::path::PathBuf;

use clap::{Parser, Subcommand};
use promptkit::cli::{
    read_input, resolve_profile, split_to_json, transform_schema_for_model, xml_from_json,
};
use promptkit::{FormatOptions, LoggingConfig};

#[derive(Parser)]
#[command(name = "promptkit", version, about = "PromptKit CLI", author)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// 将模型输出拆分为文本与思考片段
    Split {
        input: Option<PathBuf>,
    },
    /// 将 JSON 渲染为 XML
    Xml {
        input: Option<PathBuf>,
        #[arg(long)]
        root_tag: Option<String>,
        #[arg(long, default_value = "item")]
        item_tag: String,
        #[arg(long, default_value = "null")]
        none_str: String,
        #[arg(long, default_value = "  ", conflicts_with = "no_indent")]
        indent: String,
        #[arg(long)]
        no_indent: bool,
    },
    /// 输出模型配置
    Profile {
        provider: String,
        model: String,
    },
    /// 用模型的转换器处理 JSON Schema
    Schema {
        #[arg(long)]
        model: String,
        #[arg(long, default_value = "groq")]
        provider: String,
        input: Option<PathBuf>,
    },
    #[cfg(feature = "groq")]
    /// 调用 Groq chat 接口
    Chat {
        #[arg(long)]
        model: String,
        #[arg(long)]
        system: Option<String>,
        prompt: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    LoggingConfig::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Split { input } => {
            let content = read_input(input.as_deref())?;
            println!("{}", split_to_json(&content)?);
        }
        Command::Xml {
            input,
            root_tag,
            item_tag,
            none_str,
            indent,
            no_indent,
        } => {
            let mut options = FormatOptions::default()
                .with_item_tag(item_tag)
                .with_none_str(none_str);
            if let Some(root_tag) = root_tag {
                options = options.with_root_tag(root_tag);
            }
            options = if no_indent {
                options.without_indent()
            } else {
                options.with_indent(indent)
            };
            let content = read_input(input.as_deref())?;
            println!("{}", xml_from_json(&content, &options)?);
        }
        Command::Profile { provider, model } => match resolve_profile(&provider, &model)? {
            Some(profile) => println!("{}", serde_json::to_string_pretty(&profile)?),
            None => println!("No profile for `{model}` from `{provider}`, defaults apply"),
        },
        Command::Schema {
            model,
            provider,
            input,
        } => {
            let content = read_input(input.as_deref())?;
            let schema = transform_schema_for_model(&provider, &model, &content)?;
            println!("{}", serde_json::to_string_pretty(&schema)?);
        }
        #[cfg(feature = "groq")]
        Command::Chat {
            model,
            system,
            prompt,
        } => handle_chat(model, system, prompt).await?,
    }
    Ok(())
}

#[cfg(feature = "groq")]
async fn handle_chat(model: String, system: Option<String>, prompt: String) -> anyhow::Result<()> {
    use promptkit::{ContentPart, GroqProvider, LlmClient, LlmRequest};

    let provider = GroqProvider::from_env()?;
    let chat = provider.model(model);
    let mut request = LlmRequest::new(prompt);
    if let Some(system) = system {
        request = request.with_system(system);
    }

    let response = chat.complete(request).await?;
    for part in &response.parts {
        match part {
            ContentPart::Thinking(thinking) => eprintln!("[thinking] {}", thinking.content),
            ContentPart::Text(text) => println!("{}", text.content),
        }
    }
    Ok(())
}
