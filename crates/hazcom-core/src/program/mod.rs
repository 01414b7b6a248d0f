//! Documents assembled from the inventory and roster: the written hazard
//! communication program and the contractor safety packet.

pub mod packet;
pub mod written;

pub use packet::{build_contractor_packet, ContractorPacket, PacketChemical, PpeSummary};
pub use written::{build_written_program, InventoryLine, WrittenProgram};

/// Make text safe inside a Markdown table cell.
fn cell(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '|' => escaped.push_str("\\|"),
            '\n' | '\r' => escaped.push(' '),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn or_dash(text: Option<&str>) -> String {
    match text.map(str::trim) {
        Some(t) if !t.is_empty() => cell(t),
        _ => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_escaping() {
        assert_eq!(cell("Shelf A | B\nback"), "Shelf A \\| B back");
        assert_eq!(or_dash(Some("  ")), "-");
        assert_eq!(or_dash(None), "-");
        assert_eq!(or_dash(Some(" Goggles ")), "Goggles");
    }
}
