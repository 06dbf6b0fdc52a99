use clap::Args;
use receipt_points::error::AppError;
use receipt_points::receipts::{PointsBreakdown, Receipt, ScoringEngine};
use std::io::{self, Read, Write};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Receipt JSON file to score, or `-` to read standard input
    pub(crate) receipt: PathBuf,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let body = if args.receipt.as_os_str() == "-" {
        let mut buffer = Vec::new();
        io::stdin().read_to_end(&mut buffer)?;
        buffer
    } else {
        std::fs::read(&args.receipt)?
    };

    let receipt = Receipt::from_json(&body)?;
    let breakdown = ScoringEngine::new().score(&receipt);

    let stdout = io::stdout();
    render_breakdown(&mut stdout.lock(), &receipt, &breakdown)?;
    Ok(())
}

fn render_breakdown<W: Write>(
    out: &mut W,
    receipt: &Receipt,
    breakdown: &PointsBreakdown,
) -> io::Result<()> {
    writeln!(out, "Receipt from '{}'", receipt.retailer)?;
    writeln!(
        out,
        "Purchased {} at {}, {} items, total {}",
        receipt.purchase_date,
        receipt.purchase_time,
        receipt.items.len(),
        receipt.total
    )?;

    if breakdown.contributions.is_empty() {
        writeln!(out, "\nNo rules earned points")?;
    } else {
        writeln!(out, "\nRule breakdown")?;
        for contribution in &breakdown.contributions {
            writeln!(
                out,
                "- {:>4}  {}: {}",
                contribution.points,
                contribution.rule.label(),
                contribution.notes
            )?;
        }
    }

    writeln!(out, "\nTotal points: {}", breakdown.total_points)
}
