use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{
        Axis, Block, Borders, Chart, Clear, Dataset, Gauge, GraphType, List, ListItem,
        ListState, Paragraph, Row, Table, TableState, Tabs, Wrap,
    },
    Frame,
};

use crate::app::{App, FormField, InputMode, NewsView, Page};
use crate::format;
use crate::market::{SortDir, SortKey};
use crate::news::{NewsSort, SortOrder};
use crate::sentiment::Outlook;

const ALLOCATION_COLORS: [Color; 6] = [
    Color::Cyan,
    Color::Green,
    Color::Magenta,
    Color::Yellow,
    Color::Red,
    Color::Blue,
];

pub fn render(f: &mut Frame, app: &App) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, app, layout[0]);

    match app.page {
        Page::Market => render_market(f, app, layout[1]),
        Page::Charts => render_charts(f, app, layout[1]),
        Page::Portfolio => render_portfolio(f, app, layout[1]),
        Page::Sentiment => render_sentiment(f, app, layout[1]),
        Page::News => render_news(f, app, layout[1]),
        Page::Research => render_research(f, app, layout[1]),
    }

    render_footer(f, app, layout[2]);

    if app.input_mode == InputMode::HoldingForm {
        render_holding_form(f, app);
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = Page::ALL.iter().map(|p| Line::from(p.title())).collect();
    let tabs = Tabs::new(titles)
        .select(app.page.index())
        .style(Style::default().fg(app.theme.muted))
        .highlight_style(
            Style::default()
                .fg(app.theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(
                    " CoinPulse ",
                    Style::default()
                        .fg(app.theme.accent)
                        .add_modifier(Modifier::BOLD),
                )),
        );
    f.render_widget(tabs, area);
}

fn render_footer(f: &mut Frame, app: &App, area: Rect) {
    let hint = match app.input_mode {
        InputMode::HoldingForm => "Tab: next field | Enter: confirm | Esc: cancel",
        InputMode::ChartSearch | InputMode::NewsSearch | InputMode::ResearchSearch => {
            "Type to search | Enter/Esc: done"
        }
        InputMode::Normal => match app.page {
            Page::Market => "↑/↓: select | n/p/c/m/v: sort | Tab: page | t: theme | q: quit",
            Page::Charts => "↑/↓: coin | h: horizon | g: redraw | /: search | Tab: page | q: quit",
            Page::Portfolio => {
                "↑/↓: select | a: add | e: edit | d: remove | r: refresh | Tab: page | q: quit"
            }
            Page::Sentiment => "g: regenerate trend | Tab: page | t: theme | q: quit",
            Page::News => match app.news_view {
                NewsView::List => {
                    "↑/↓: select | Enter: read | /: search | c: category | d/l: sort | q: quit"
                }
                _ => "b/Esc: back to list | q: quit",
            },
            Page::Research => "↑/↓: select | /: search | c: category | p: premium only | q: quit",
        },
    };

    let footer = Paragraph::new(Line::from(vec![
        Span::styled(" Controls: ", Style::default().fg(app.theme.muted)),
        Span::styled(hint, Style::default().fg(app.theme.fg)),
    ]))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, area);
}

// ── Market ──────────────────────────────────────────────────────────────────

fn sort_marker(app: &App, key: SortKey) -> &'static str {
    match app.market.sort {
        Some(spec) if spec.key == key => match spec.dir {
            SortDir::Ascending => " ↑",
            SortDir::Descending => " ↓",
        },
        _ => "",
    }
}

fn render_market(f: &mut Frame, app: &App, area: Rect) {
    let header = Row::new(vec![
        format!("Name{}", sort_marker(app, SortKey::Name)),
        format!("Price{}", sort_marker(app, SortKey::Price)),
        format!("24h Change{}", sort_marker(app, SortKey::Change)),
        format!("Market Cap{}", sort_marker(app, SortKey::MarketCap)),
        format!("Volume (24h){}", sort_marker(app, SortKey::Volume)),
    ])
    .style(
        Style::default()
            .fg(app.theme.accent)
            .add_modifier(Modifier::BOLD),
    )
    .height(1);

    let rows: Vec<Row> = app
        .market
        .sorted()
        .iter()
        .map(|asset| {
            let change_color = if asset.change_24h >= 0.0 {
                app.theme.up
            } else {
                app.theme.down
            };
            let arrow = if asset.change_24h >= 0.0 { "▲" } else { "▼" };
            Row::new(vec![
                Line::from(vec![
                    Span::styled(asset.name, Style::default().fg(app.theme.fg)),
                    Span::styled(
                        format!(" ({})", asset.symbol),
                        Style::default().fg(app.theme.muted),
                    ),
                ]),
                Line::from(format::currency(asset.price)),
                Line::from(Span::styled(
                    format!("{} {}", arrow, format::percent(asset.change_24h.abs(), false)),
                    Style::default().fg(change_color),
                )),
                Line::from(Span::styled(
                    format::compact(asset.market_cap),
                    Style::default().fg(app.theme.muted),
                )),
                Line::from(Span::styled(
                    format::compact(asset.volume_24h),
                    Style::default().fg(app.theme.muted),
                )),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(28),
            Constraint::Percentage(18),
            Constraint::Percentage(16),
            Constraint::Percentage(19),
            Constraint::Percentage(19),
        ],
    )
    .header(header)
    .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Market Overview "),
    );

    let mut state = TableState::default();
    state.select(Some(app.market_selected.min(app.market.assets.len().saturating_sub(1))));
    f.render_stateful_widget(table, area, &mut state);
}

// ── Charts ──────────────────────────────────────────────────────────────────

fn render_charts(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(28), Constraint::Percentage(72)])
        .split(area);

    render_coin_list(f, app, chunks[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(0)])
        .split(chunks[1]);

    render_chart_summary(f, app, right[0]);
    render_price_chart(f, app, right[1]);
}

fn render_coin_list(f: &mut Frame, app: &App, area: Rect) {
    let assets = app.chart_assets();
    let items: Vec<ListItem> = assets
        .iter()
        .map(|asset| {
            let change_color = if asset.change_24h >= 0.0 {
                app.theme.up
            } else {
                app.theme.down
            };
            ListItem::new(Line::from(vec![
                Span::styled(asset.name, Style::default().fg(app.theme.fg)),
                Span::raw(" "),
                Span::styled(
                    format::percent(asset.change_24h, true),
                    Style::default().fg(change_color),
                ),
            ]))
        })
        .collect();

    let title = if app.input_mode == InputMode::ChartSearch {
        format!(" Coins /{}▌ ", app.chart_search)
    } else if app.chart_search.is_empty() {
        " Coins ".to_string()
    } else {
        format!(" Coins /{} ", app.chart_search)
    };

    let list = List::new(items)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .block(Block::default().borders(Borders::ALL).title(title));

    let mut state = ListState::default();
    if !assets.is_empty() {
        state.select(Some(app.chart_selected.min(assets.len() - 1)));
    }
    f.render_stateful_widget(list, area, &mut state);
}

fn render_chart_summary(f: &mut Frame, app: &App, area: Rect) {
    let Some(asset) = app.chart_asset() else {
        let empty = Paragraph::new("No matching coins")
            .style(Style::default().fg(app.theme.muted))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(empty, area);
        return;
    };

    let (change, change_pct) = app.chart_change;
    let change_color = if change >= 0.0 { app.theme.up } else { app.theme.down };

    let lines = vec![
        Line::from(vec![
            Span::styled(
                format!("{} ({})", asset.name, asset.symbol),
                Style::default()
                    .fg(app.theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                format::currency(asset.price),
                Style::default().fg(app.theme.fg).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled(
                format!("{} over {}: ", if change >= 0.0 { "Up" } else { "Down" }, app.horizon.as_str()),
                Style::default().fg(app.theme.muted),
            ),
            Span::styled(
                format!(
                    "{} ({})",
                    format::percent(change_pct, true),
                    format::currency(change)
                ),
                Style::default().fg(change_color),
            ),
            Span::styled(
                format!("  updated {}", app.chart_updated.format("%H:%M:%S UTC")),
                Style::default().fg(app.theme.muted),
            ),
        ]),
    ];

    let summary = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    f.render_widget(summary, area);
}

fn render_price_chart(f: &mut Frame, app: &App, area: Rect) {
    if app.chart_series.is_empty() {
        let empty = Paragraph::new("No data")
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(empty, area);
        return;
    }

    let points: Vec<(f64, f64)> = app
        .chart_series
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.price))
        .collect();

    let min_price = points.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
    let max_price = points.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);

    let time_fmt = match app.horizon {
        crate::series::Horizon::H24 | crate::series::Horizon::D7 => "%H:%M",
        _ => "%b %d",
    };
    let first_label = app
        .chart_series
        .first()
        .map(|p| p.timestamp.format(time_fmt).to_string())
        .unwrap_or_default();
    let last_label = app
        .chart_series
        .last()
        .map(|p| p.timestamp.format(time_fmt).to_string())
        .unwrap_or_default();

    let name = app.chart_asset().map(|a| a.symbol).unwrap_or("");
    let datasets = vec![Dataset::default()
        .name(name)
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(app.theme.accent))
        .data(&points)];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(
                    format!(" {} — {} ", name, app.horizon.as_str()),
                    Style::default()
                        .fg(app.theme.accent)
                        .add_modifier(Modifier::BOLD),
                )),
        )
        .x_axis(
            Axis::default()
                .style(Style::default().fg(app.theme.muted))
                .bounds([0.0, (points.len() - 1) as f64])
                .labels(vec![
                    Span::styled(first_label, Style::default().fg(app.theme.muted)),
                    Span::styled(last_label, Style::default().fg(app.theme.muted)),
                ]),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(app.theme.muted))
                .bounds([min_price * 0.95, max_price * 1.05])
                .labels(vec![
                    Span::styled(format::currency(min_price), Style::default().fg(app.theme.muted)),
                    Span::styled(format::currency(max_price), Style::default().fg(app.theme.muted)),
                ]),
        );

    f.render_widget(chart, area);
}

// ── Portfolio ───────────────────────────────────────────────────────────────

fn render_portfolio(f: &mut Frame, app: &App, area: Rect) {
    let has_notice = app.notice.is_some() || app.refreshing;
    let constraints = if has_notice {
        vec![
            Constraint::Length(3),
            Constraint::Percentage(40),
            Constraint::Min(0),
            Constraint::Length(1),
        ]
    } else {
        vec![
            Constraint::Length(3),
            Constraint::Percentage(40),
            Constraint::Min(0),
        ]
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let summary = app.summary();
    render_summary_cards(f, app, &summary, chunks[0]);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(chunks[1]);
    render_performance_chart(f, app, middle[0]);
    render_allocations(f, app, &summary, middle[1]);

    render_holdings_table(f, app, chunks[2]);

    if has_notice {
        let text = if app.refreshing {
            "Refreshing..."
        } else {
            app.notice.as_deref().unwrap_or("")
        };
        let notice = Paragraph::new(Span::styled(
            format!(" {}", text),
            Style::default().fg(app.theme.highlight),
        ));
        f.render_widget(notice, chunks[3]);
    }
}

fn render_summary_cards(
    f: &mut Frame,
    app: &App,
    summary: &crate::portfolio::PortfolioSummary,
    area: Rect,
) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let profit_color = if summary.profit >= 0.0 { app.theme.up } else { app.theme.down };
    let profit_arrow = if summary.profit >= 0.0 { "▲" } else { "▼" };

    let card = |title: &'static str, value: String, color: Color| {
        Paragraph::new(Span::styled(
            value,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
        .block(Block::default().borders(Borders::ALL).title(title))
    };

    f.render_widget(
        card(" Total Value ", format::currency(summary.total_value), app.theme.fg),
        cards[0],
    );
    f.render_widget(
        card(" Invested ", format::currency(summary.total_cost), app.theme.fg),
        cards[1],
    );
    f.render_widget(
        card(
            " Profit/Loss ",
            format!(
                "{}{}",
                if summary.profit >= 0.0 { "+" } else { "" },
                format::currency(summary.profit)
            ),
            profit_color,
        ),
        cards[2],
    );
    f.render_widget(
        card(
            " Profit % ",
            format!("{} {}", format::percent(summary.profit_percent, true), profit_arrow),
            profit_color,
        ),
        cards[3],
    );
}

fn render_performance_chart(f: &mut Frame, app: &App, area: Rect) {
    let perf = app.performance();
    let points: Vec<(f64, f64)> = perf
        .iter()
        .enumerate()
        .map(|(i, &(_, v))| (i as f64, v))
        .collect();

    if points.is_empty() || app.portfolio.is_empty() {
        let empty = Paragraph::new("Add assets to see performance")
            .alignment(Alignment::Center)
            .style(Style::default().fg(app.theme.muted))
            .block(Block::default().borders(Borders::ALL).title(" Performance (30D) "));
        f.render_widget(empty, area);
        return;
    }

    let min_v = points.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
    let max_v = points.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);

    let datasets = vec![Dataset::default()
        .name("Value")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(app.theme.accent))
        .data(&points)];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Performance (30D) "),
        )
        .x_axis(
            Axis::default()
                .style(Style::default().fg(app.theme.muted))
                .bounds([0.0, (points.len() - 1) as f64]),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(app.theme.muted))
                .bounds([min_v * 0.95, max_v * 1.05])
                .labels(vec![
                    Span::styled(format::compact(min_v), Style::default().fg(app.theme.muted)),
                    Span::styled(format::compact(max_v), Style::default().fg(app.theme.muted)),
                ]),
        );
    f.render_widget(chart, area);
}

fn render_allocations(
    f: &mut Frame,
    app: &App,
    summary: &crate::portfolio::PortfolioSummary,
    area: Rect,
) {
    let items: Vec<ListItem> = summary
        .allocations
        .iter()
        .enumerate()
        .map(|(i, alloc)| {
            let color = ALLOCATION_COLORS[i % ALLOCATION_COLORS.len()];
            ListItem::new(Line::from(vec![
                Span::styled("■ ", Style::default().fg(color)),
                Span::styled(
                    format!("{:<6}", alloc.symbol),
                    Style::default().fg(app.theme.fg),
                ),
                Span::styled(
                    format!("{:>14}", format::currency(alloc.value)),
                    Style::default().fg(app.theme.fg),
                ),
                Span::styled(
                    format!("  {}", format::percent(alloc.percent, false)),
                    Style::default().fg(app.theme.muted),
                ),
            ]))
        })
        .collect();

    let list = if items.is_empty() {
        List::new(vec![ListItem::new(Span::styled(
            "Add assets to see your allocation",
            Style::default().fg(app.theme.muted),
        ))])
    } else {
        List::new(items)
    };

    f.render_widget(
        list.block(Block::default().borders(Borders::ALL).title(" Allocation ")),
        area,
    );
}

fn render_holdings_table(f: &mut Frame, app: &App, area: Rect) {
    if app.portfolio.is_empty() {
        let empty = Paragraph::new("No holdings yet. Press 'a' to add an asset.")
            .alignment(Alignment::Center)
            .style(Style::default().fg(app.theme.muted))
            .block(Block::default().borders(Borders::ALL).title(" Holdings "));
        f.render_widget(empty, area);
        return;
    }

    let header = Row::new(vec!["Asset", "Price", "24h", "Holdings", "Avg Buy", "Value", "P/L"])
        .style(
            Style::default()
                .fg(app.theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .height(1);

    let rows: Vec<Row> = app
        .portfolio
        .holdings()
        .iter()
        .map(|holding| {
            match app.market.find(&holding.symbol) {
                Some(asset) => {
                    let value = holding.quantity * asset.price;
                    let pl = value - holding.quantity * holding.cost_basis;
                    let pl_color = if pl >= 0.0 { app.theme.up } else { app.theme.down };
                    let change_color = if asset.change_24h >= 0.0 {
                        app.theme.up
                    } else {
                        app.theme.down
                    };
                    Row::new(vec![
                        Line::from(holding.symbol.clone()),
                        Line::from(format::currency(asset.price)),
                        Line::from(Span::styled(
                            format::percent(asset.change_24h, true),
                            Style::default().fg(change_color),
                        )),
                        Line::from(format!("{}", holding.quantity)),
                        Line::from(format::currency(holding.cost_basis)),
                        Line::from(format::currency(value)),
                        Line::from(Span::styled(
                            format!(
                                "{}{}",
                                if pl >= 0.0 { "+" } else { "" },
                                format::currency(pl)
                            ),
                            Style::default().fg(pl_color),
                        )),
                    ])
                }
                // Price data can lag a holding edit; show the row unpriced.
                None => Row::new(vec![
                    Line::from(holding.symbol.clone()),
                    Line::from("—"),
                    Line::from("—"),
                    Line::from(format!("{}", holding.quantity)),
                    Line::from(format::currency(holding.cost_basis)),
                    Line::from("—"),
                    Line::from("—"),
                ]),
            }
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(8),
            Constraint::Length(14),
            Constraint::Length(10),
            Constraint::Length(12),
            Constraint::Length(14),
            Constraint::Length(14),
            Constraint::Min(12),
        ],
    )
    .header(header)
    .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
    .block(Block::default().borders(Borders::ALL).title(" Holdings "));

    let mut state = TableState::default();
    state.select(Some(app.portfolio_selected.min(app.portfolio.len().saturating_sub(1))));
    f.render_stateful_widget(table, area, &mut state);
}

fn render_holding_form(f: &mut Frame, app: &App) {
    let Some(form) = &app.form else { return };

    let area = centered_rect(f.area(), 44, 9);
    f.render_widget(Clear, area);

    let field_line = |label: &'static str, value: &str, active: bool| {
        let marker = if active { "▌" } else { " " };
        let style = if active {
            Style::default().fg(app.theme.highlight).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.fg)
        };
        Line::from(vec![
            Span::styled(format!(" {:<10}", label), Style::default().fg(app.theme.muted)),
            Span::styled(format!("{}{}", value, marker), style),
        ])
    };

    let lines = vec![
        Line::from(""),
        field_line("Symbol", &form.symbol, form.field == FormField::Symbol && !form.editing),
        field_line("Quantity", &form.quantity, form.field == FormField::Quantity),
        field_line("Buy price", &form.price, form.field == FormField::Price),
        Line::from(""),
        Line::from(Span::styled(
            " Enter on buy price confirms",
            Style::default().fg(app.theme.muted),
        )),
    ];

    let title = if form.editing { " Edit Asset " } else { " Add Asset " };
    let popup = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.accent))
            .title(title),
    );
    f.render_widget(popup, area);
}

// ── Sentiment ───────────────────────────────────────────────────────────────

fn render_sentiment(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(38), Constraint::Percentage(62)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(0)])
        .split(chunks[0]);

    render_sentiment_gauge(f, app, left[0]);
    render_sentiment_factors(f, app, left[1]);
    render_sentiment_history(f, app, chunks[1]);
}

fn render_sentiment_gauge(f: &mut Frame, app: &App, area: Rect) {
    let displayed = app.gauge.displayed();
    let outlook = Outlook::classify(displayed);

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Current Market Sentiment "),
        )
        .gauge_style(Style::default().fg(outlook.color()))
        .percent(displayed as u16)
        .label(Span::styled(
            format!("{} — {}", displayed, outlook.label()),
            Style::default()
                .fg(app.theme.fg)
                .add_modifier(Modifier::BOLD),
        ));
    f.render_widget(gauge, area);
}

fn render_sentiment_factors(f: &mut Frame, app: &App, area: Rect) {
    let bar_width = 16usize;
    let items: Vec<ListItem> = app
        .factors
        .iter()
        .map(|factor| {
            let filled = (factor.score as usize * bar_width) / 100;
            let bar: String = "█".repeat(filled) + &"░".repeat(bar_width - filled);
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(
                        format!("{:<18}", factor.name),
                        Style::default().fg(app.theme.fg),
                    ),
                    Span::styled(factor.trend.arrow(), Style::default().fg(factor.trend.color())),
                    Span::styled(
                        format!(" {:>3}/100", factor.score),
                        Style::default().fg(app.theme.fg),
                    ),
                ]),
                Line::from(vec![
                    Span::styled(bar, Style::default().fg(app.theme.accent)),
                    Span::styled(
                        format!(" {}", factor.description),
                        Style::default().fg(app.theme.muted),
                    ),
                ]),
            ])
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Sentiment Factors "),
    );
    f.render_widget(list, area);
}

fn render_sentiment_history(f: &mut Frame, app: &App, area: Rect) {
    let points: Vec<(f64, f64)> = app
        .sentiment_history
        .iter()
        .enumerate()
        .map(|(i, &(_, v))| (i as f64, v as f64))
        .collect();

    let datasets = vec![Dataset::default()
        .name("Sentiment")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(app.theme.accent))
        .data(&points)];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Sentiment Trend (30D) "),
        )
        .x_axis(
            Axis::default()
                .style(Style::default().fg(app.theme.muted))
                .bounds([0.0, (points.len().max(2) - 1) as f64]),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(app.theme.muted))
                .bounds([0.0, 100.0])
                .labels(vec![
                    Span::styled("0", Style::default().fg(app.theme.muted)),
                    Span::styled("50", Style::default().fg(app.theme.muted)),
                    Span::styled("100", Style::default().fg(app.theme.muted)),
                ]),
        );
    f.render_widget(chart, area);
}

// ── News & research ─────────────────────────────────────────────────────────

fn render_news(f: &mut Frame, app: &App, area: Rect) {
    match &app.news_view {
        NewsView::List => render_news_list(f, app, area),
        NewsView::Reader(_) => render_article(f, app, area),
        NewsView::NotFound(id) => render_not_found(f, app, id, area),
    }
}

fn render_news_list(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let search_display = if app.input_mode == InputMode::NewsSearch {
        format!("{}▌", app.news_search)
    } else {
        app.news_search.clone()
    };
    let sort_label = match (app.news_sort, app.news_order) {
        (NewsSort::Date, SortOrder::Desc) => "date ↓",
        (NewsSort::Date, SortOrder::Asc) => "date ↑",
        (NewsSort::Likes, SortOrder::Desc) => "likes ↓",
        (NewsSort::Likes, SortOrder::Asc) => "likes ↑",
    };
    let filter_bar = Paragraph::new(Line::from(vec![
        Span::styled(" Search: ", Style::default().fg(app.theme.muted)),
        Span::styled(search_display, Style::default().fg(app.theme.fg)),
        Span::styled("  Category: ", Style::default().fg(app.theme.muted)),
        Span::styled(
            crate::news::CATEGORIES[app.news_category],
            Style::default().fg(app.theme.accent),
        ),
        Span::styled("  Sort: ", Style::default().fg(app.theme.muted)),
        Span::styled(sort_label, Style::default().fg(app.theme.accent)),
    ]))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(filter_bar, chunks[0]);

    let items_data = app.filtered_news();
    let items: Vec<ListItem> = items_data
        .iter()
        .map(|item| {
            ListItem::new(vec![
                Line::from(Span::styled(
                    item.title,
                    Style::default().fg(app.theme.fg).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    format!(
                        "{} · {} · {} min read · {} likes",
                        item.category,
                        item.date.format("%b %d, %Y"),
                        item.read_time_min,
                        item.likes
                    ),
                    Style::default().fg(app.theme.muted),
                )),
            ])
        })
        .collect();

    let title = format!(" Latest Crypto News ({}) ", items_data.len());
    let list = List::new(items)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .block(Block::default().borders(Borders::ALL).title(title));

    let mut state = ListState::default();
    if !items_data.is_empty() {
        state.select(Some(app.news_selected.min(items_data.len() - 1)));
    }
    f.render_stateful_widget(list, chunks[1], &mut state);
}

fn render_article(f: &mut Frame, app: &App, area: Rect) {
    let Some(article) = app.open_article() else {
        render_not_found(f, app, "?", area);
        return;
    };

    let mut lines = vec![
        Line::from(Span::styled(
            article.title,
            Style::default()
                .fg(app.theme.accent)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!(
                "{} — {} · {} · {}",
                article.author,
                article.author_position,
                article.date.format("%b %d, %Y"),
                article.category
            ),
            Style::default().fg(app.theme.muted),
        )),
        Line::from(Span::styled(
            format!("Tags: {}", article.tags.join(", ")),
            Style::default().fg(app.theme.muted),
        )),
        Line::from(""),
    ];
    for paragraph in article.body {
        lines.push(Line::from(Span::styled(
            *paragraph,
            Style::default().fg(app.theme.fg),
        )));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        format!(
            "{} likes · {} comments · {} shares",
            article.likes, article.comments, article.shares
        ),
        Style::default().fg(app.theme.muted),
    )));

    let reader = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(" Article "));
    f.render_widget(reader, area);
}

fn render_not_found(f: &mut Frame, app: &App, id: &str, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Article not found",
            Style::default().fg(app.theme.down).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("No article matches id '{}'.", id),
            Style::default().fg(app.theme.fg),
        )),
        Line::from(Span::styled(
            "Press b or Esc to go back to the list.",
            Style::default().fg(app.theme.muted),
        )),
    ];
    let msg = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(" Not Found "));
    f.render_widget(msg, area);
}

fn render_research(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let search_display = if app.input_mode == InputMode::ResearchSearch {
        format!("{}▌", app.research_search)
    } else {
        app.research_search.clone()
    };
    let filter_bar = Paragraph::new(Line::from(vec![
        Span::styled(" Search: ", Style::default().fg(app.theme.muted)),
        Span::styled(search_display, Style::default().fg(app.theme.fg)),
        Span::styled("  Category: ", Style::default().fg(app.theme.muted)),
        Span::styled(
            crate::news::CATEGORIES[app.research_category],
            Style::default().fg(app.theme.accent),
        ),
        Span::styled("  Premium only: ", Style::default().fg(app.theme.muted)),
        Span::styled(
            if app.research_premium_only { "yes" } else { "no" },
            Style::default().fg(app.theme.accent),
        ),
    ]))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(filter_bar, chunks[0]);

    let reports = app.filtered_reports();
    let items: Vec<ListItem> = reports
        .iter()
        .map(|report| {
            let mut title_spans = vec![Span::styled(
                report.title,
                Style::default().fg(app.theme.fg).add_modifier(Modifier::BOLD),
            )];
            if report.premium {
                title_spans.push(Span::styled(
                    "  [PREMIUM]",
                    Style::default().fg(app.theme.highlight),
                ));
            }
            ListItem::new(vec![
                Line::from(title_spans),
                Line::from(Span::styled(
                    format!(
                        "{} · {} · {} pages · {}",
                        report.author,
                        report.date.format("%b %d, %Y"),
                        report.pages,
                        report.category
                    ),
                    Style::default().fg(app.theme.muted),
                )),
                Line::from(Span::styled(
                    report.summary,
                    Style::default().fg(app.theme.muted),
                )),
            ])
        })
        .collect();

    let title = format!(" Research Reports ({}) ", reports.len());
    let list = List::new(items)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .block(Block::default().borders(Borders::ALL).title(title));

    let mut state = ListState::default();
    if !reports.is_empty() {
        state.select(Some(app.research_selected.min(reports.len() - 1)));
    }
    f.render_stateful_widget(list, chunks[1], &mut state);
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}
