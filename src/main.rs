use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use big_big_words::export::ExportFormat;
use big_big_words::word_forms::{PartsOfSpeech, generate_word_forms};
use big_big_words::{Config, Word, WordBook, WordData, WordForms};

#[derive(Parser)]
#[clap(version, about = "英语单词本：查词、翻译、词形变化和复习")]
struct Cli {
    #[clap(long, default_value = "config.toml", help = "Config file path")]
    config: PathBuf,

    #[clap(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    #[clap(about = "Generate word forms offline")]
    Forms {
        word: String,
        #[clap(long, value_enum, help = "Part of speech; guessed from the suffix when omitted")]
        pos: Vec<PosArg>,
    },
    #[clap(flatten)]
    Book(BookAction),
}

// 需要打开单词本的命令
#[derive(Subcommand)]
enum BookAction {
    #[clap(about = "Look up, translate and save a word")]
    Add { word: String },
    #[clap(about = "Look up a word without saving it")]
    Lookup { word: String },
    #[clap(about = "List saved words")]
    List {
        #[clap(long, help = "Only the 10 most recent words")]
        recent: bool,
        #[clap(long, help = "Only mastered words")]
        mastered: bool,
    },
    #[clap(about = "Show one word in detail")]
    Show { id: i64 },
    #[clap(about = "Record a review of a word")]
    Review { id: i64 },
    #[clap(about = "Delete a word")]
    Delete { id: i64 },
    #[clap(about = "Set the mastery of a word (0-100)")]
    Mastery {
        id: i64,
        #[clap(value_parser = clap::value_parser!(u8).range(0..=100))]
        value: u8,
    },
    #[clap(about = "Export all words")]
    Export {
        #[clap(value_enum)]
        format: FormatArg,
        #[clap(long, help = "Output directory")]
        dir: Option<PathBuf>,
    },
    #[clap(about = "Show statistics")]
    Stats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PosArg {
    Verb,
    Noun,
    Adjective,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Csv,
    Json,
}

impl From<FormatArg> for ExportFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Json => ExportFormat::Json,
        }
    }
}

fn print_forms(forms: &WordForms) {
    if forms.is_empty() {
        println!("   （没有生成词形）");
        return;
    }
    for (label, form) in forms.entries() {
        println!("   {}: {}", label, form);
    }
}

fn print_word_summary(word: &Word) {
    let first_meaning = word
        .chinese_meaning
        .first()
        .and_then(|m| m.definitions.first())
        .map(String::as_str)
        .unwrap_or("");
    let mark = if word.is_mastered() { "⭐" } else { "  " };
    println!(
        "{:>4} {} {:<16} {:<18} 复习 {:>2} 次  掌握度 {:>3}%  {}",
        word.id,
        mark,
        word.word,
        word.phonetic,
        word.review_count,
        word.mastery,
        first_meaning
    );
}

fn print_word_detail(word: &Word) {
    println!("📖 {} {}", word.word, word.phonetic);
    println!("   词性: {}", word.part_of_speech.join("·"));
    for meaning in &word.chinese_meaning {
        println!("   [{}] {}", meaning.part_of_speech, meaning.definitions.join("；"));
        for example in &meaning.examples {
            println!("      例: {}", example);
        }
    }
    for meaning in &word.english_meaning {
        println!("   ({}) {}", meaning.part_of_speech, meaning.definitions.join("; "));
        for example in &meaning.examples {
            println!("      e.g. {}", example);
        }
    }
    if !word.etymology.origin.is_empty() {
        println!("   词源: {}", word.etymology.origin);
    }
    if let Some(forms) = &word.word_forms {
        println!("   词形变化:");
        print_forms(forms);
    }
    println!(
        "   添加于 {}，复习 {} 次，掌握度 {}%",
        word.created_at.format("%Y-%m-%d"),
        word.review_count,
        word.mastery
    );
}

fn print_word_data(data: &WordData) {
    println!("📖 {} {}", data.word, data.phonetic);
    println!("   词性: {}", data.part_of_speech.join("·"));
    for meaning in &data.english_meanings {
        println!("   ({}) {}", meaning.part_of_speech, meaning.definitions.join("; "));
    }
    if let Some(origin) = &data.origin {
        println!("   词源: {}", origin);
    }
    if let Some(forms) = &data.word_forms {
        println!("   词形变化:");
        print_forms(forms);
    }
}

fn print_generated_forms(word: &str, pos: &[PosArg]) {
    let lower = word.trim().to_lowercase();
    let tags = if pos.is_empty() {
        PartsOfSpeech::classify(&lower)
    } else {
        PartsOfSpeech {
            verb: pos.contains(&PosArg::Verb),
            noun: pos.contains(&PosArg::Noun),
            adjective: pos.contains(&PosArg::Adjective),
        }
    };
    println!("🔤 {}", lower);
    print_forms(&generate_word_forms(&lower, tags));
}

async fn run(cli: Cli) -> Result<()> {
    match cli.action {
        // 词形生成不需要数据库和网络
        Action::Forms { word, pos } => {
            print_generated_forms(&word, &pos);
            Ok(())
        }
        Action::Book(action) => {
            let config = Config::load(&cli.config)?;
            let book = WordBook::new(config).await?;
            run_with_book(&book, action).await
        }
    }
}

async fn run_with_book(book: &WordBook, action: BookAction) -> Result<()> {
    match action {
        BookAction::Add { word } => {
            let saved = book.add_word(&word).await?;
            print_word_detail(&saved);
        }
        BookAction::Lookup { word } => {
            let data = book.preview_word(&word).await?;
            print_word_data(&data);
        }
        BookAction::List { recent, mastered } => {
            let words = if recent {
                book.recent_words().await?
            } else if mastered {
                book.mastered_words().await?
            } else {
                book.list_words().await?
            };
            if words.is_empty() {
                println!("⚠️  没有找到任何单词");
            }
            for word in &words {
                print_word_summary(word);
            }
        }
        BookAction::Show { id } => match book.get_word(id).await? {
            Some(word) => print_word_detail(&word),
            None => anyhow::bail!("未找到ID为 {} 的单词", id),
        },
        BookAction::Review { id } => {
            let word = book.review_word(id).await?;
            println!(
                "✅ {} 已复习 {} 次，掌握度 {}%",
                word.word, word.review_count, word.mastery
            );
        }
        BookAction::Delete { id } => {
            if book.delete_word(id).await? {
                println!("🗑️  已删除 ID {}", id);
            } else {
                anyhow::bail!("未找到ID为 {} 的单词", id);
            }
        }
        BookAction::Mastery { id, value } => {
            let word = book.set_mastery(id, value).await?;
            println!("✅ {} 掌握度设置为 {}%", word.word, word.mastery);
        }
        BookAction::Export { format, dir } => {
            book.export(format.into(), dir).await?;
        }
        BookAction::Stats => {
            let stats = book.stats().await?;
            println!("📊 单词总数: {}", stats.total);
            println!("   已掌握: {}", stats.mastered);
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_forms_is_parsed_as_offline_command() {
        let cli = Cli::try_parse_from(["big-big-words", "forms", "running", "--pos", "verb"]).unwrap();
        match cli.action {
            Action::Forms { word, pos } => {
                assert_eq!(word, "running");
                assert_eq!(pos, vec![PosArg::Verb]);
            }
            Action::Book(_) => panic!("forms should not open the word book"),
        }
    }

    #[test]
    fn test_book_commands_are_flattened() {
        let cli = Cli::try_parse_from(["big-big-words", "mastery", "3", "90"]).unwrap();
        assert!(matches!(
            cli.action,
            Action::Book(BookAction::Mastery { id: 3, value: 90 })
        ));
        assert!(Cli::try_parse_from(["big-big-words", "mastery", "3", "101"]).is_err());
    }
}
