//! Output formatting module

use unim_domain::service::QueryResult;
use unim_types::{ContainerSize, FareKind, OutputFormat, Result};

/// Thousands-separated won amount (e.g. 1234567 -> "1,234,567")
pub fn format_won(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if amount < 0 {
        out.insert(0, '-');
    }
    out
}

/// Distance for the table: known values carry the km unit, unknown stays `-`
fn distance_cell(text: &str) -> String {
    if text == "-" {
        text.to_string()
    } else {
        format!("{}km", text)
    }
}

pub fn output_query(
    output_format: OutputFormat,
    result: &QueryResult,
    size: ContainerSize,
) -> Result<()> {
    if output_format == OutputFormat::Json {
        let content = serde_json::to_string_pretty(result)?;
        println!("{}", content);
        return Ok(());
    }

    // Table format. Fare columns are gated by the size projection,
    // 40FT group first.
    let mut header: Vec<String> = vec![
        "출발지".to_string(),
        "시·도".to_string(),
        "시·군·구".to_string(),
        "읍·면·동".to_string(),
        "구간거리".to_string(),
    ];
    if size.shows_forty() {
        for kind in FareKind::ALL {
            header.push(format!("40FT {}(원)", kind.label()));
        }
    }
    if size.shows_twenty() {
        for kind in FareKind::ALL {
            header.push(format!("20FT {}(원)", kind.label()));
        }
    }
    println!("{}", header.join("\t"));

    for query_row in &result.visible {
        let row = &query_row.row;
        let mut cells: Vec<String> = vec![
            query_row.origin.clone(),
            row.admin_region.clone().unwrap_or_else(|| "-".to_string()),
            row.admin_sub_region
                .clone()
                .unwrap_or_else(|| "-".to_string()),
            row.sub_area.clone().unwrap_or_else(|| "-".to_string()),
            distance_cell(&row.distance_text()),
        ];
        if size.shows_forty() {
            for kind in FareKind::ALL {
                cells.push(format_won(row.fare_40(kind)));
            }
        }
        if size.shows_twenty() {
            for kind in FareKind::ALL {
                cells.push(format_won(row.fare_20(kind)));
            }
        }
        println!("{}", cells.join("\t"));
    }

    println!();
    println!("{} / {} rows", result.visible.len(), result.total_matched);
    if result.has_more {
        println!("(pass --all or a larger --limit to see the rest)");
    }

    Ok(())
}

pub fn output_origins(
    output_format: OutputFormat,
    trip_label: &str,
    origins: &[String],
) -> Result<()> {
    if output_format == OutputFormat::Json {
        let content = serde_json::to_string_pretty(origins)?;
        println!("{}", content);
    } else {
        println!("{} 출발지 ({})", trip_label, origins.len());
        for name in origins {
            println!("  {}", name);
        }
    }
    Ok(())
}
