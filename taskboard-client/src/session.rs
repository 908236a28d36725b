//! SyncSession - remote-or-local card synchronisation
//!
//! A session probes the server once when it starts. If the probe succeeds
//! every load and save goes through the HTTP API; otherwise the session keeps
//! its cards in a [`LocalStore`] for the rest of its lifetime.

use crate::client::RemoteBoard;
use crate::error::{ClientError, Result};
use crate::local::{LocalStore, LOCAL_STORE_KEY};
use crate::seed::SeedSource;
use crate::view::BoardView;
use std::sync::Arc;
use taskboard::card::AddCard;
use taskboard::{BoardDocument, Card, CardId, CardPatch, ColumnId, Priority, UNASSIGNED};

/// Smallest id handed out by the local counter
pub const ID_FLOOR: u64 = 100;

/// Where the session persists cards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    /// Through the HTTP API
    Remote,
    /// In the local store
    Local,
}

impl std::fmt::Display for SyncMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Remote => f.write_str("remote"),
            Self::Local => f.write_str("local"),
        }
    }
}

/// Create/edit form input. `id` is set when editing an existing card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardForm {
    pub id: Option<CardId>,
    pub title: String,
    pub assignee: String,
    pub description: String,
    pub priority: Priority,
    pub column: ColumnId,
}

impl CardForm {
    /// A blank create form
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            assignee: String::new(),
            description: String::new(),
            priority: Priority::default(),
            column: ColumnId::from(taskboard::DEFAULT_COLUMNS[0]),
        }
    }

    /// An edit form prefilled from `card`
    pub fn edit(card: &Card) -> Self {
        Self {
            id: Some(card.id.clone()),
            title: card.title.clone(),
            assignee: card.assignee.clone(),
            description: card.description.clone(),
            priority: card.priority,
            column: card.column.clone(),
        }
    }

    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = assignee.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_column(mut self, column: impl Into<ColumnId>) -> Self {
        self.column = column.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Trim text fields; `None` when the title is blank
    fn normalized(&self) -> Option<NormalizedForm> {
        let title = self.title.trim();
        if title.is_empty() {
            return None;
        }
        let assignee = match self.assignee.trim() {
            "" => UNASSIGNED,
            a => a,
        };
        Some(NormalizedForm {
            title: title.to_string(),
            assignee: assignee.to_string(),
            description: self.description.trim().to_string(),
            priority: self.priority,
            column: self.column.clone(),
        })
    }
}

struct NormalizedForm {
    title: String,
    assignee: String,
    description: String,
    priority: Priority,
    column: ColumnId,
}

impl NormalizedForm {
    fn into_patch(self) -> CardPatch {
        CardPatch::new()
            .with_title(self.title)
            .with_assignee(self.assignee)
            .with_description(self.description)
            .with_priority(self.priority)
            .with_column(self.column)
    }

    fn into_add_card(self) -> AddCard {
        AddCard::new(self.title)
            .with_assignee(self.assignee)
            .with_description(self.description)
            .with_priority(self.priority)
            .with_column(self.column)
    }

    fn into_card(self, id: CardId) -> Card {
        Card::new(id, self.title, self.column)
            .with_assignee(self.assignee)
            .with_description(self.description)
            .with_priority(self.priority)
    }
}

/// Next counter value: at least the floor and above every numeric id
fn next_counter(current: u64, cards: &[Card]) -> u64 {
    cards
        .iter()
        .filter_map(|c| c.id.numeric())
        .map(|n| n.saturating_add(1))
        .fold(current.max(ID_FLOOR), u64::max)
}

/// Client-side state for one board session
pub struct SyncSession {
    mode: SyncMode,
    remote: Arc<dyn RemoteBoard>,
    store: Arc<dyn LocalStore>,
    seed: Arc<dyn SeedSource>,
    columns: Vec<ColumnId>,
    cards: Vec<Card>,
    next_id: u64,
}

impl SyncSession {
    /// Probe the server and pick the session's mode.
    ///
    /// Any probe failure selects [`SyncMode::Local`]; the session never
    /// switches back to remote.
    pub async fn start(
        remote: Arc<dyn RemoteBoard>,
        store: Arc<dyn LocalStore>,
        seed: Arc<dyn SeedSource>,
    ) -> Self {
        let mode = match remote.health().await {
            Ok(()) => {
                tracing::info!("using server API for persistence");
                SyncMode::Remote
            }
            Err(e) => {
                tracing::warn!("server unavailable ({}), using local store", e);
                SyncMode::Local
            }
        };

        Self {
            mode,
            remote,
            store,
            seed,
            columns: BoardDocument::default_columns(),
            cards: Vec::new(),
            next_id: ID_FLOOR,
        }
    }

    pub fn mode(&self) -> SyncMode {
        self.mode
    }

    pub fn is_remote(&self) -> bool {
        self.mode == SyncMode::Remote
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn columns(&self) -> &[ColumnId] {
        &self.columns
    }

    /// The id the next locally created card will get
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    pub fn card(&self, id: &CardId) -> Option<&Card> {
        self.cards.iter().find(|c| &c.id == id)
    }

    /// Cards grouped by column
    pub fn view(&self) -> BoardView {
        BoardView::build(&self.columns, &self.cards)
    }

    /// Load the card collection and reset the id counter from it
    pub async fn load(&mut self) -> Result<&[Card]> {
        self.cards = match self.mode {
            SyncMode::Remote => {
                let listing = self.remote.fetch_board().await?;
                self.columns = listing.columns;
                listing.cards
            }
            SyncMode::Local => self.load_local().await?,
        };
        self.next_id = next_counter(ID_FLOOR, &self.cards);
        tracing::debug!(mode = %self.mode, cards = self.cards.len(), "loaded cards");
        Ok(&self.cards)
    }

    /// Local store first; when empty, seed it once; otherwise no cards
    async fn load_local(&self) -> Result<Vec<Card>> {
        if let Some(raw) = self.store.get(LOCAL_STORE_KEY).await? {
            return Ok(serde_json::from_str(&raw)?);
        }

        let seeded = async {
            let cards = self.seed.seed().await?;
            let raw = serde_json::to_string(&cards)?;
            self.store.set(LOCAL_STORE_KEY, &raw).await?;
            Ok::<_, ClientError>(cards)
        };

        match seeded.await {
            Ok(cards) => {
                tracing::info!(cards = cards.len(), "seeded local store");
                Ok(cards)
            }
            Err(e) => {
                tracing::warn!("could not seed local store: {}", e);
                Ok(Vec::new())
            }
        }
    }

    /// Write the full card collection to the active backend
    pub async fn persist(&self) -> Result<()> {
        match self.mode {
            SyncMode::Remote => self.remote.replace_all(&self.cards).await,
            SyncMode::Local => {
                let raw = serde_json::to_string(&self.cards)?;
                self.store.set(LOCAL_STORE_KEY, &raw).await
            }
        }
    }

    /// Create or edit a card from form input.
    ///
    /// A blank title is dropped without contacting any backend and yields
    /// `Ok(None)`.
    pub async fn save_card(&mut self, form: CardForm) -> Result<Option<Card>> {
        let Some(data) = form.normalized() else {
            tracing::debug!("ignoring card form with empty title");
            return Ok(None);
        };

        if !self.is_remote() && !self.columns.contains(&data.column) {
            return Err(ClientError::validation(format!(
                "'{}' is not a board column",
                data.column
            )));
        }

        let card = match (&form.id, self.mode) {
            (Some(id), SyncMode::Remote) => {
                let card = self.remote.update(id, &data.into_patch()).await?;
                self.upsert(card.clone());
                card
            }
            (Some(id), SyncMode::Local) => {
                let patch = data.into_patch();
                let existing = self
                    .cards
                    .iter_mut()
                    .find(|c| &c.id == id)
                    .ok_or_else(|| ClientError::not_found(id.as_str()))?;
                patch.apply(existing);
                let card = existing.clone();
                self.persist().await?;
                card
            }
            (None, SyncMode::Remote) => {
                let card = self.remote.create(&data.into_add_card()).await?;
                self.cards.push(card.clone());
                card
            }
            (None, SyncMode::Local) => {
                let id = CardId::from(self.next_id.to_string());
                self.next_id += 1;
                let card = data.into_card(id);
                self.cards.push(card.clone());
                self.persist().await?;
                card
            }
        };

        Ok(Some(card))
    }

    /// Move a card to another column and persist the whole collection
    pub async fn move_card(&mut self, id: &CardId, column: impl Into<ColumnId>) -> Result<Card> {
        let column = column.into();
        if !self.columns.contains(&column) {
            return Err(ClientError::validation(format!(
                "'{}' is not a board column",
                column
            )));
        }

        let card = self
            .cards
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| ClientError::not_found(id.as_str()))?;
        card.column = column;
        let card = card.clone();

        self.persist().await?;
        Ok(card)
    }

    /// Remove a card
    pub async fn delete_card(&mut self, id: &CardId) -> Result<Card> {
        match self.mode {
            SyncMode::Remote => {
                let deleted = self.remote.delete(id).await?;
                self.cards.retain(|c| &c.id != id);
                Ok(deleted)
            }
            SyncMode::Local => {
                let index = self
                    .cards
                    .iter()
                    .position(|c| &c.id == id)
                    .ok_or_else(|| ClientError::not_found(id.as_str()))?;
                let deleted = self.cards.remove(index);
                self.persist().await?;
                Ok(deleted)
            }
        }
    }

    /// Re-fetch from the server and adopt the result if it differs.
    ///
    /// Returns whether the in-memory cards or columns changed. Always `false`
    /// in local mode.
    pub async fn refresh(&mut self) -> Result<bool> {
        if !self.is_remote() {
            return Ok(false);
        }

        let listing = self.remote.fetch_board().await?;
        if listing.cards == self.cards && listing.columns == self.columns {
            return Ok(false);
        }

        self.next_id = next_counter(self.next_id, &listing.cards);
        self.cards = listing.cards;
        self.columns = listing.columns;
        tracing::debug!(
            cards = self.cards.len(),
            columns = self.columns.len(),
            "board changed on server"
        );
        Ok(true)
    }

    fn upsert(&mut self, card: Card) {
        match self.cards.iter_mut().find(|c| c.id == card.id) {
            Some(existing) => *existing = card,
            None => self.cards.push(card),
        }
    }
}

impl std::fmt::Debug for SyncSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncSession")
            .field("mode", &self.mode)
            .field("cards", &self.cards.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}
