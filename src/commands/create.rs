use crate::core::config::Config;
use crate::core::scaffold::{ScaffoldOutcome, Scaffolder};
use crate::error::{Result, ScaffoldError};

const PROMPT: &str = "Enter the directory to download Gooo into (e.g., ~/projects/gooo)";

pub struct CreateOptions {
    pub path: Option<String>,
    pub url: Option<String>,
    pub no_strip: bool,
    pub timeout_secs: Option<u64>,
}

pub fn create_project(options: CreateOptions) -> Result<()> {
    let config = apply_overrides(Config::load()?, &options);

    let raw_input = match options.path {
        Some(path) => path,
        None => prompt_for_directory()?,
    };

    let outcome = Scaffolder::new(config).run(&raw_input)?;
    report(&outcome);
    Ok(())
}

pub fn apply_overrides(mut config: Config, options: &CreateOptions) -> Config {
    if let Some(url) = &options.url {
        config.archive_url = url.clone();
    }
    if options.no_strip {
        config.strip_top_level = false;
    }
    if options.timeout_secs.is_some() {
        config.timeout_secs = options.timeout_secs;
    }
    config
}

fn prompt_for_directory() -> Result<String> {
    dialoguer::Input::<String>::new()
        .with_prompt(PROMPT)
        .allow_empty(true)
        .interact_text()
        .map_err(|e| ScaffoldError::Prompt {
            message: e.to_string(),
        })
}

fn report(outcome: &ScaffoldOutcome) {
    if let Some(warning) = &outcome.cleanup_warning {
        eprintln!("⚠️  Warning: {warning}");
    }

    let dir = outcome.target_dir.display();
    println!("✅ Success! Gooo project is set up in {dir}");
    println!();
    println!("To start development:");
    println!("  1. Navigate to the project: cd {dir}");
    println!("  2. Start the Vite development server: npm run dev");
    println!("  3. Start the Go backend: go run main.go");
}
