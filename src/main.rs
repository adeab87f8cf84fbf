use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use csv::{ReaderBuilder, Trim};
use tokio::sync::mpsc;

use tenge::config::Config;
use tenge::document::{
    ClientInfo, CommercialProposal, Document, DocumentItem, DocumentState, Invoice, item_rows,
    render_totals,
};
use tenge::logger;

/// The size of the channel for incoming line items.
const CHANNEL_SIZE: usize = 100;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Kind {
    /// Commercial proposal
    Kp,
    /// Invoice for payment
    Invoice,
}

/// Prices a list of line items and prints the item table and totals.
#[derive(Debug, Parser)]
#[command(name = "tenge", version)]
struct Cli {
    /// CSV with columns name,unit,quantity,price and optionally size
    input: PathBuf,

    #[arg(long, value_enum, default_value = "invoice")]
    kind: Kind,

    #[arg(long, default_value = "1")]
    number: String,

    #[arg(long, default_value = "")]
    date: String,

    /// Buyer (invoice) or client (proposal) name
    #[arg(long, default_value = "")]
    client: String,

    #[arg(long, default_value = "Алматы")]
    city: String,

    /// VAT rate in percent, overriding the config
    #[arg(long)]
    vat_rate: Option<f64>,

    /// Issue the invoice without VAT
    #[arg(long)]
    no_vat: bool,

    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(short, long)]
    verbose: bool,
}

fn empty_document(cli: &Cli, config: &Config) -> Document {
    let client = ClientInfo::new(cli.client.clone());
    match cli.kind {
        Kind::Kp => Document::Proposal(CommercialProposal {
            id: 1,
            number: cli.number.clone(),
            date: cli.date.clone(),
            city: cli.city.clone(),
            client,
            items: Vec::new(),
            notes: None,
            valid_until: None,
        }),
        Kind::Invoice => Document::Invoice(Invoice {
            id: 1,
            number: cli.number.clone(),
            date: cli.date.clone(),
            supplier: config.company.clone(),
            buyer: client,
            items: Vec::new(),
            contract_number: None,
            contract_date: None,
            notes: None,
            include_vat: config.invoice.include_vat && !cli.no_vat,
            vat_rate: cli.vat_rate.unwrap_or(config.invoice.vat_rate),
        }),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logger::init_cli_logger(cli.verbose);

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    tracing::debug!(?config, "loaded configuration");

    let (sender, receiver) = mpsc::channel(CHANNEL_SIZE);
    let mut state = DocumentState::new(empty_document(&cli, &config), receiver);

    let handle = tokio::spawn(async move {
        state.run().await;
        state
    });

    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .from_path(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;

    for (line, row) in reader.deserialize::<DocumentItem>().enumerate() {
        match row {
            Ok(item) => {
                if let Err(err) = sender.send(item).await {
                    tracing::error!("error sending line item: {err}");
                }
            }
            Err(err) => tracing::warn!(row = line + 1, "skipping malformed row: {err}"),
        }
    }

    drop(sender); // Close the sender to signal no more items will be sent
    let document = handle
        .await
        .context("failed to join the document task")?
        .into_document();
    tracing::info!(items = document.items().len(), "{}", document.title());

    let formatter = config.format.formatter();
    let mut writer = csv::Writer::from_writer(std::io::stdout());
    for row in item_rows(&document, &formatter)? {
        writer.serialize(row)?;
    }
    writer.flush()?;

    println!();
    println!("{}", document.title());
    if let Document::Invoice(invoice) = &document {
        println!("Поставщик: {}", invoice.supplier.supplier_line());
        println!("Покупатель: {}", invoice.buyer.buyer_line());
    }
    println!(
        "{}",
        render_totals(&document, &formatter, &config.format.currency_symbol)?
    );
    Ok(())
}
