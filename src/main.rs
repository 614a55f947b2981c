use clap::Parser;
use dubletten_check::{cli, config, error, export, loader, logging, prompt, report};
use cli::{Cli, Commands};
use config::Config;
use dubletten_common::{
    normalize, require_columns, run_check, CheckOutcome, CheckRequest, RecordTable,
};
use error::Result;
use std::path::{Path, PathBuf};

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.quiet);

    if let Err(e) = run(cli) {
        eprintln!("Beim Verarbeiten der Datei ist ein Fehler aufgetreten: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Exact { input, column, group, output, sheet, json } => {
            let config = Config::load()?;
            if !json {
                println!("🔍 dubletten-check - Auswertung nach exakten Werten\n");
            }

            let table = load(&input, sheet.as_deref(), &config, json)?;

            let group_column = group.unwrap_or_else(|| config.group_column.clone());
            // 列選択の前にグループ列を確認
            require_columns(table.columns(), &[group_column.as_str()])?;
            let column = match column {
                Some(column) => column,
                None => prompt::select_column(table.columns(), &group_column)?,
            };
            let request = CheckRequest {
                group_column,
                ..config.exact_request(column)
            };

            check_and_export(&table, &request, output, json)?;
        }

        Commands::Year { input, digicode, output, sheet, json } => {
            let config = Config::load()?;
            if !json {
                println!("📚 dubletten-check - Börsenblatt\n");
            }

            let table = load(&input, sheet.as_deref(), &config, json)?;

            let mut request = config.year_request();
            if let Some(digicode) = digicode {
                request.digicode = digicode;
            }

            check_and_export(&table, &request, output, json)?;
        }

        Commands::Columns { input, sheet } => {
            let sheets = loader::sheet_names(&input)?;
            println!("Tabellenblätter: {}\n", sheets.join(", "));

            let table = loader::load_table(&input, sheet.as_deref())?;
            println!("{} Zeilen\n", table.len());
            report::print_column_kinds(&table.column_kinds());
        }

        Commands::Fields => {
            report::print_field_mapping();
        }

        Commands::Config { show, reset } => {
            if reset {
                let config = Config::default();
                config.save()?;
                println!("✔ Konfiguration zurückgesetzt: {}", Config::config_path()?.display());
            }

            if show || !reset {
                let config = Config::load()?;
                println!("Konfiguration ({}):", Config::config_path()?.display());
                println!("  Gruppierungsspalte:            {}", config.group_column);
                println!("  Gruppierungsspalte Börsenblatt: {}", config.year_group_column);
                println!("  Identifikator:                 {}", config.identifier_column);
                println!("  Digicode:                      {}", config.digicode);
                println!("  Vorschauzeilen:                {}", config.preview_rows);
            }
        }
    }

    Ok(())
}

/// 読み込み + 列診断 + プレビュー
fn load(input: &Path, sheet: Option<&str>, config: &Config, json: bool) -> Result<RecordTable> {
    if !json {
        println!("[1/3] Datei wird geladen...");
    }
    let table = loader::load_table(input, sheet)?;

    if !json {
        println!("✔ {} Zeilen, {} Spalten\n", table.len(), table.columns().len());
        report::print_column_kinds(&table.column_kinds());
        println!();
        report::print_preview(&normalize(&table), config.preview_rows);
    }

    Ok(table)
}

/// チェック実行 + 結果表示 + 出力
fn check_and_export(
    table: &RecordTable,
    request: &CheckRequest,
    output: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    if !json {
        println!("[2/3] Dubletten werden überprüft...");
    }
    let outcome = run_check(table, request)?;

    if !json {
        report::print_duplicates(&outcome);
    }

    let Some(file) = outcome.export()? else {
        return print_summary(&outcome, None, json);
    };

    if !json {
        println!("\n[3/3] Excel-Datei wird erstellt...");
    }
    let output_dir = output.unwrap_or_else(|| PathBuf::from("."));
    let path = export::write_export(&file, &output_dir)?;

    if !json {
        println!("✔ Tabellenblätter: {}", file.sheet_names.join(", "));
        println!("✔ Duplikate gespeichert: {}", path.display());
    }

    print_summary(&outcome, Some((path.as_path(), file.mime_type, file.sheet_names.clone())), json)
}

fn print_summary(
    outcome: &CheckOutcome,
    export: Option<(&Path, &str, Vec<String>)>,
    json: bool,
) -> Result<()> {
    if json {
        let summary = report::RunSummary::new(outcome, export);
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }
    Ok(())
}
