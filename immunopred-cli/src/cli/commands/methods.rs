use crate::cli::output::*;
use clap::Args;
use comfy_table::{Cell, Color};
use immunopred_core::load_default_config;
use immunopred_core::system::describe_paths;
use immunopred_tools::{Method, ToolLocator};
use serde_json::json;

#[derive(Args)]
pub struct MethodsArgs {
    /// Also list every supported allele
    #[arg(long)]
    pub alleles: bool,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: String,
}

pub fn run(args: MethodsArgs) -> anyhow::Result<()> {
    tracing::debug!("{}", describe_paths());
    let config = load_default_config()?;
    let locator = ToolLocator::new(config.tools_dir());

    let methods: Vec<_> = Method::all().iter().map(|m| (*m, m.create())).collect();

    match args.format.as_str() {
        "json" => {
            let entries: Vec<_> = methods
                .iter()
                .map(|(method, adapter)| {
                    let executable = config
                        .executable_for(method.id())
                        .map(str::to_string)
                        .or_else(|| {
                            locator
                                .locate(adapter.executable())
                                .map(|p| p.display().to_string())
                        });
                    let mut entry = json!({
                        "id": method.id(),
                        "name": adapter.name(),
                        "version": adapter.version(),
                        "lengths": adapter.supported_lengths(),
                        "allele_count": adapter.supported_alleles().len(),
                        "executable": executable,
                    });
                    if args.alleles {
                        let alleles: Vec<&str> = adapter.supported_alleles().iter().collect();
                        entry["alleles"] = json!(alleles);
                    }
                    entry
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        _ => {
            section_header("Prediction Methods");

            let mut table = create_standard_table();
            table.set_header(vec![
                header_cell("Method"),
                header_cell("Tool"),
                header_cell("Version"),
                header_cell("Lengths"),
                header_cell("Alleles"),
                header_cell("Executable"),
            ]);

            for (method, adapter) in &methods {
                let executable = match config.executable_for(method.id()) {
                    Some(configured) => Cell::new(configured).fg(Color::Blue),
                    None => match locator.locate(adapter.executable()) {
                        Some(path) => Cell::new(path.display().to_string()).fg(Color::Green),
                        None => Cell::new(format!("{} (not found)", adapter.executable()))
                            .fg(Color::DarkGrey),
                    },
                };
                table.add_row(vec![
                    Cell::new(method.id()),
                    Cell::new(method.display_name()),
                    Cell::new(adapter.version()),
                    Cell::new(format_lengths(adapter.supported_lengths())),
                    Cell::new(adapter.supported_alleles().len()),
                    executable,
                ]);
            }
            println!("{}", table);

            if args.alleles {
                for (method, adapter) in &methods {
                    section_header(method.display_name());
                    let alleles = adapter.supported_alleles();
                    if alleles.is_empty() {
                        empty("No alleles");
                        continue;
                    }
                    let last = alleles.len() - 1;
                    for (i, name) in alleles.iter().enumerate() {
                        tree_item(i == last, name, None);
                    }
                }
            } else {
                info("Use --alleles to list supported alleles");
            }
        }
    }

    Ok(())
}
