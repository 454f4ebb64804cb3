use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use std::{io, path::PathBuf};

use seller_report::{generate_sales_report, IntegrityPolicy, SalesData, SalesReport, Strategies};

/// Ranks sellers by profit, and reports their revenue, units sold, top
/// products and bonus.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// JSON file holding `sellers`, `products` and `purchase_records`
    data: PathBuf,

    #[arg(short, long, value_enum, default_value_t = Format::Table)]
    format: Format,

    /// Revenue strategy: `discounted` or `gross`
    #[arg(long, default_value = "discounted")]
    revenue: String,

    /// Bonus strategy: `profit-tiers`
    #[arg(long, default_value = "profit-tiers")]
    bonus: String,

    /// Fail on records naming unknown sellers or products, instead of
    /// skipping them
    #[arg(long)]
    strict: bool,

    /// Show only the N best-ranked sellers
    #[arg(long, value_name = "N")]
    top: Option<usize>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Table,
    Json,
    Csv,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();
    let args = Args::parse();
    let data = SalesData::from_path(&args.data)?;
    let integrity = if args.strict {
        IntegrityPolicy::Reject
    } else {
        IntegrityPolicy::Skip
    };
    let strategies = Strategies::named(&args.revenue, &args.bonus)?.with_integrity(integrity);
    let mut report = SalesReport::new(
        generate_sales_report(&data, &strategies)
            .with_context(|| format!("analysing {}", args.data.display()))?,
    );
    if let Some(n) = args.top {
        report.truncate(n);
    }
    match args.format {
        Format::Table => print!("{report}"),
        Format::Json => println!("{}", report.to_json()?),
        Format::Csv => report.write_csv(io::stdout().lock())?,
    }
    Ok(())
}
