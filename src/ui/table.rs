use crate::monitor::RowSet;
use crate::ui::theme::Theme;
use crate::util::human::{fmt_pct, fmt_rate};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

pub const COLUMNS: [&str; 10] = [
    "Device", "Mount", "Used", "Avail", "Size", "Use%", "R ops/s", "W ops/s", "R KB/s", "W KB/s",
];

/// Draw the full-screen view: title bar, the row table, key hints.
pub fn render(f: &mut Frame, set: Option<&RowSet>, state: &mut TableState, theme: &Theme) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0), Constraint::Length(1)])
        .split(f.area());

    let title = match set {
        Some(s) => format!(
            " diskmon   {}   every {:.1}s   cycle {}",
            s.taken_at.format("%H:%M:%S"),
            s.interval.as_secs_f64(),
            s.cycle,
        ),
        None => " diskmon   collecting…".to_string(),
    };
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(title, theme.title))).style(theme.header),
        root[0],
    );

    let count = set.map_or(0, |s| s.rows.len());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border)
        .title(Span::styled(format!("Filesystems ({})", count), theme.title));
    let inner = block.inner(root[1]);
    f.render_widget(block, root[1]);

    let header = Row::new(COLUMNS.iter().map(|h| Cell::from(*h).style(theme.text_dim)))
        .style(Style::default().add_modifier(Modifier::BOLD))
        .height(1);

    let rows: Vec<Row> = set.map(|s| s.rows.as_slice()).unwrap_or_default().iter().map(|r| {
        let pct_style = theme.util_style(r.usage_percent);
        let mut cells = vec![
            Cell::from(r.device.clone()).style(theme.text_dim),
            Cell::from(r.mount_point.clone()).style(theme.text),
            Cell::from(r.used.clone()).style(pct_style),
            Cell::from(r.available.clone()).style(theme.text_dim),
            Cell::from(r.total.clone()).style(theme.text_dim),
            Cell::from(fmt_pct(r.usage_percent)).style(pct_style),
        ];
        cells.extend(r.rate_values().into_iter().map(|v| {
            let style = if v.is_some() { theme.text } else { theme.unavailable };
            Cell::from(fmt_rate(v)).style(style)
        }));
        Row::new(cells)
    }).collect();

    let widths = [
        Constraint::Min(12),
        Constraint::Min(14),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(7),
        Constraint::Length(9),
        Constraint::Length(9),
        Constraint::Length(10),
        Constraint::Length(10),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .row_highlight_style(theme.selected);
    f.render_stateful_widget(table, inner, state);

    let keys: [(&str, &str); 4] = [("q", "Quit"), ("↑↓/jk", "Scroll"), ("g/G", "Top/Bot"), ("t", "Theme")];
    let mut spans: Vec<Span> = vec![Span::styled(" ", theme.footer_bg)];
    for (key, desc) in keys {
        spans.push(Span::styled(format!(" {} ", key), theme.footer_key));
        spans.push(Span::styled(format!("{}  ", desc), theme.footer_text));
    }
    spans.push(Span::styled("  │  N/A = no rate yet", theme.footer_text));
    f.render_widget(Paragraph::new(Line::from(spans)).style(theme.footer_bg), root[2]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::filesystem::CapacityReading;
    use crate::models::rates::IORates;
    use crate::models::row::Row as DataRow;
    use crate::ui::theme::ThemeVariant;
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::Duration;

    fn screen_text(term: &Terminal<TestBackend>) -> String {
        let buf = term.backend().buffer();
        let width = buf.area.width as usize;
        buf.content
            .chunks(width)
            .map(|line| line.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn sample_set() -> RowSet {
        let cap = |dev: &str, mount: &str| CapacityReading {
            device:          dev.into(),
            mount_point:     mount.into(),
            fs_type:         "ext4".into(),
            io_device:       dev.trim_start_matches("/dev/").into(),
            total_bytes:     122_797_260_800,
            used_bytes:      61_398_630_400,
            available_bytes: 55_000_000_000,
        };
        let rates = IORates {
            device:            "sda1".into(),
            read_ops_per_sec:  Some(6.5),
            write_ops_per_sec: None,
            read_kb_per_sec:   Some(55.0),
            write_kb_per_sec:  Some(50.0),
        };
        RowSet {
            rows: vec![
                DataRow::new(&cap("/dev/sda1", "/"), Some(rates)),
                DataRow::new(&cap("/dev/sdb1", "/data"), None),
            ],
            taken_at: chrono::Local::now(),
            cycle:    2,
            interval: Duration::from_secs(2),
        }
    }

    #[test]
    fn draws_rows_with_unavailable_markers() {
        let mut term = Terminal::new(TestBackend::new(130, 8)).unwrap();
        let theme = Theme::for_variant(ThemeVariant::Default);
        let set = sample_set();
        let mut state = TableState::default();
        term.draw(|f| render(f, Some(&set), &mut state, &theme)).unwrap();

        let text = screen_text(&term);
        assert!(text.contains("Filesystems (2)"), "{text}");
        assert!(text.contains("/data"));
        assert!(text.contains("114.3 GB"));
        assert!(text.contains("50.0%"));
        assert!(text.contains("6.5"));
        assert!(text.contains("55.0"));
        // one unavailable cell on the first row, four on the second
        assert_eq!(text.matches("N/A").count(), 5 + 1);
    }

    #[test]
    fn draws_placeholder_before_first_cycle() {
        let mut term = Terminal::new(TestBackend::new(80, 6)).unwrap();
        let theme = Theme::for_variant(ThemeVariant::Mono);
        let mut state = TableState::default();
        term.draw(|f| render(f, None, &mut state, &theme)).unwrap();
        let text = screen_text(&term);
        assert!(text.contains("collecting"));
        assert!(text.contains("Filesystems (0)"));
    }
}
