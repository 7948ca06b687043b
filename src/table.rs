use crate::classify::{BatchSummary, Classifier};
use crate::model::{Classification, HostRecord};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

const PLACEHOLDER: &str = "-";

const HEADER: [&str; 16] = [
    "Host",
    "Pinging Host",
    "Reverse DNS",
    "Ping",
    "IP",
    "TTL",
    "OS",
    "SSH",
    "RDP",
    "Location",
    "Building",
    "Floor",
    "Office",
    "Obsolete",
    "Note",
    "Status",
];

fn status_color(classification: Classification) -> Color {
    match classification {
        Classification::Reachable => Color::Green,
        Classification::Restricted => Color::Yellow,
        Classification::DnsMismatch => Color::DarkYellow,
        Classification::UnknownError => Color::Red,
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "open"
    } else {
        "closed"
    }
}

/// Build the result table, one row per record
pub fn records_table(records: &[HostRecord], classifier: &Classifier) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS)
        .set_header(HEADER.to_vec());

    for record in records {
        let classification = classifier.classify(record);
        let mut row = vec![
            Cell::new(&record.host),
            Cell::new(record.pinging_host.as_deref().unwrap_or(PLACEHOLDER)),
            Cell::new(record.reverse_dns_name.as_deref().unwrap_or(PLACEHOLDER)),
            Cell::new(if record.responded() { "yes" } else { "no" }),
            Cell::new(
                record
                    .reachable_ip
                    .map_or_else(|| "unresolved".to_string(), |ip| ip.to_string()),
            ),
            Cell::new(record.ttl.map_or_else(|| PLACEHOLDER.to_string(), |t| t.to_string())),
            Cell::new(record.os_family),
            Cell::new(yes_no(record.ssh_open)),
            Cell::new(yes_no(record.rdp_open)),
        ];
        row.extend(record.inventory.display_fields().into_iter().map(Cell::new));
        row.push(Cell::new(classification).fg(status_color(classification)));
        table.add_row(row);
    }
    table
}

/// Per-category counts, one line each
pub fn summary_lines(summary: &BatchSummary) -> Vec<String> {
    let mut lines = Vec::with_capacity(Classification::ALL.len() + 1);
    for classification in Classification::ALL {
        let label = format!("{classification:>14}");
        let label = match classification {
            Classification::Reachable => label.green().bold(),
            Classification::Restricted => label.yellow().bold(),
            Classification::DnsMismatch => label.magenta().bold(),
            Classification::UnknownError => label.red().bold(),
        };
        lines.push(format!("{label}: {}", summary.count(classification)));
    }
    lines.push(format!("{:>14}: {}", "total", summary.total()));
    lines
}
