use contextflow_types::{ConnectorOffer, IconRef, WorkspaceFeed};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{BorderType, Paragraph, Widget, Wrap},
};

use super::{ContentTarget, dashboard::render_heading};
use crate::ui::theme::{Theme, theme_helpers as th};

const CARD_HEIGHT: u16 = 7;
const MIN_CARD_WIDTH: u16 = 30;
const MAX_COLUMNS: u16 = 3;

/// "Add Intelligence": one card per connector offer plus the custom
/// connector card.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectorsPanel {
    pub offers: Vec<ConnectorOffer>,
}

impl ConnectorsPanel {
    pub fn from_feed(feed: &dyn WorkspaceFeed) -> Self {
        Self {
            offers: feed.connector_offers(),
        }
    }

    /// Offer cards in order, then the custom connector card.
    pub fn targets(&self) -> Vec<ContentTarget> {
        self.offers
            .iter()
            .map(|offer| ContentTarget::Offer(offer.id.clone()))
            .chain(std::iter::once(ContentTarget::CustomConnector))
            .collect()
    }

    pub fn card_count(&self) -> usize {
        self.offers.len() + 1
    }

    /// Columns the card grid uses at `width`.
    pub fn columns_for(width: u16) -> u16 {
        (width / MIN_CARD_WIDTH).clamp(1, MAX_COLUMNS)
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer, theme: &dyn Theme, highlighted: Option<usize>) -> Vec<Rect> {
        let [header, grid] = Layout::vertical([Constraint::Length(3), Constraint::Min(0)])
            .horizontal_margin(2)
            .areas(area);
        render_heading(
            header,
            buf,
            theme,
            ("Add ", "Intelligence"),
            "Select workspace to index and analyze for better context flow.",
        );

        let columns = Self::columns_for(grid.width) as usize;
        let rows = self.card_count().div_ceil(columns);
        let row_areas = Layout::vertical(vec![Constraint::Length(CARD_HEIGHT); rows])
            .spacing(1)
            .split(grid);

        let mut hits = Vec::with_capacity(self.card_count());
        for index in 0..self.card_count() {
            let row_area = row_areas[index / columns];
            let cells = Layout::horizontal(vec![Constraint::Ratio(1, columns as u32); columns])
                .spacing(2)
                .split(row_area);
            let card_area = cells[index % columns];
            let is_highlighted = highlighted == Some(index);
            match self.offers.get(index) {
                Some(offer) => render_offer(offer, card_area, buf, theme, is_highlighted),
                None => render_custom(card_area, buf, theme, is_highlighted),
            }
            hits.push(card_area);
        }
        hits
    }
}

fn render_offer(offer: &ConnectorOffer, area: Rect, buf: &mut Buffer, theme: &dyn Theme, highlighted: bool) {
    let accent = th::accent_color(theme, &offer.accent);
    let block = th::card(theme, highlighted);
    let inner = block.inner(area);
    block.render(area, buf);

    let [name, description, action] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(0), Constraint::Length(1)]).areas(inner);
    Line::from(vec![
        Span::styled(format!("{} ", offer.icon.glyph()), Style::default().fg(accent).add_modifier(Modifier::BOLD)),
        Span::styled(offer.name.as_str(), theme.text_primary_style().add_modifier(Modifier::BOLD)),
    ])
    .render(name, buf);
    Paragraph::new(Span::styled(offer.description.as_str(), theme.text_muted_style()))
        .wrap(Wrap { trim: true })
        .render(description, buf);

    let action_style = if highlighted {
        theme.accent_emphasis_style()
    } else {
        theme.accent_primary_style()
    };
    Line::from(Span::styled(
        format!("Connect Service {}", IconRef::ChevronRight.glyph()),
        action_style,
    ))
    .render(action, buf);
}

fn render_custom(area: Rect, buf: &mut Buffer, theme: &dyn Theme, highlighted: bool) {
    let block = th::card(theme, highlighted).border_type(BorderType::Plain);
    let inner = block.inner(area);
    block.render(area, buf);

    let style = if highlighted {
        theme.accent_emphasis_style()
    } else {
        theme.text_muted_style()
    };
    let [_, icon, label] = Layout::vertical([Constraint::Fill(1), Constraint::Length(1), Constraint::Fill(1)]).areas(inner);
    Line::from(Span::styled(IconRef::Plus.glyph(), style))
        .alignment(Alignment::Center)
        .render(icon, buf);
    Line::from(Span::styled("CUSTOM API CONNECTOR", style.add_modifier(Modifier::BOLD)))
        .alignment(Alignment::Center)
        .render(label, buf);
}
