//! Text and JSON rendering for command results.

use crate::commands::AttrInfo;
use crate::topology::AppliedInterface;
use serde::Serialize;
use sonic_sai::attribute::AttrAccess;
use sonic_sai::conformance::ConformanceReport;
use std::fmt::Write;

/// Pretty-printed JSON, newline terminated.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    let mut text = serde_json::to_string_pretty(value)?;
    text.push('\n');
    Ok(text)
}

fn access_label(access: AttrAccess) -> &'static str {
    match access {
        AttrAccess::CreateOnly => "CREATE_ONLY",
        AttrAccess::CreateAndSet => "CREATE_AND_SET",
    }
}

pub fn render_attribute_table(rows: &[AttrInfo]) -> String {
    let name_width = rows.iter().map(|r| r.name.len()).max().unwrap_or(0);
    let mut out = String::new();
    for row in rows {
        let _ = write!(
            out,
            "{:>2}  {:<name_width$}  {:<16}  {:<14}  {}",
            row.id,
            row.name,
            row.value_type,
            access_label(row.access),
            row.presence,
        );
        if let Some(default) = row.default {
            let _ = write!(out, " (default: {})", default);
        }
        out.push('\n');
    }
    out
}

pub fn render_report(report: &ConformanceReport) -> String {
    format!("{}\n", report)
}

pub fn render_interfaces(interfaces: &[AppliedInterface]) -> String {
    let mut out = String::new();
    for iface in interfaces {
        let s = &iface.snapshot;
        let _ = writeln!(
            out,
            "{}: {} type={} {} mac={} v4={} v6={} mtu={}",
            iface.name,
            s.rif,
            s.rif_type,
            s.binding,
            s.src_mac,
            if s.admin_v4 { "up" } else { "down" },
            if s.admin_v6 { "up" } else { "down" },
            s.mtu,
        );
    }
    out
}
