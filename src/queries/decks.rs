//! User-built decks and their card slots.

use crate::connection::Connection;
use crate::error::{MtgManagerError, Result};
use crate::models::{Deck, DeckCard, NewDeck, User};
use crate::queries::collection::CARD_COLUMNS;
use crate::sql_builder::{InsertBuilder, IntoSqlValue, SqlBuilder, UpdateBuilder};

const DECK_COLUMNS: &[&str] = &[
    "d.id",
    "d.user_id",
    "d.name",
    "d.description",
    "d.format",
    "strftime(d.created_at, '%Y-%m-%dT%H:%M:%S') AS created_at",
    "COUNT(dc.id) AS card_count",
];

const DECK_GROUP_BY: &[&str] = &[
    "d.id",
    "d.user_id",
    "d.name",
    "d.description",
    "d.format",
    "d.created_at",
    "d.position",
];

// ---------------------------------------------------------------------------
// DeckQuery
// ---------------------------------------------------------------------------

pub struct DeckQuery<'a> {
    conn: &'a Connection,
}

impl<'a> DeckQuery<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// The user's decks, newest first, with their card row counts.
    pub fn list(&self, user: &User) -> Result<Vec<Deck>> {
        let (sql, params) = deck_select()
            .where_eq("d.user_id", &user.id)
            .group_by(DECK_GROUP_BY)
            .order_by(&["d.position DESC"])
            .build();
        self.conn.execute_into(&sql, &params)
    }

    /// A single deck owned by the user.
    pub fn get(&self, user: &User, deck_id: &str) -> Result<Deck> {
        let (sql, params) = deck_select()
            .where_eq("d.id", deck_id)
            .where_eq("d.user_id", &user.id)
            .group_by(DECK_GROUP_BY)
            .build();
        let decks: Vec<Deck> = self.conn.execute_into(&sql, &params)?;
        decks
            .into_iter()
            .next()
            .ok_or_else(|| MtgManagerError::NotFound(format!("Deck {deck_id} not found")))
    }

    pub fn create(&self, user: &User, new: &NewDeck) -> Result<Deck> {
        let name = new.name.trim();
        if name.is_empty() {
            return Err(MtgManagerError::InvalidArgument(
                "Deck name is required".to_string(),
            ));
        }
        let format = new.format.trim();
        if format.is_empty() {
            return Err(MtgManagerError::InvalidArgument(
                "Deck format is required".to_string(),
            ));
        }
        let description = new
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty());

        let id = uuid::Uuid::new_v4().to_string();
        let (sql, params) = InsertBuilder::table("decks")
            .value("id", &id)
            .value("user_id", &user.id)
            .value("name", name)
            .value("description", description)
            .value("format", format)
            .build();
        self.conn.execute_statement(&sql, &params)?;
        log::info!("Created {format} deck '{name}' for {}", user.id);
        self.get(user, &id)
    }

    /// Put copies of a stored card into a deck. Adding a card that is
    /// already in the same board increases that slot.
    pub fn add_card(
        &self,
        user: &User,
        deck_id: &str,
        card_id: &str,
        quantity: i64,
        sideboard: bool,
    ) -> Result<DeckCard> {
        if quantity < 1 {
            return Err(MtgManagerError::InvalidArgument(format!(
                "Quantity must be at least 1, got {quantity}"
            )));
        }
        self.get(user, deck_id)?;
        let card_exists = self
            .conn
            .execute_scalar("SELECT 1 FROM cards WHERE id = ?", &[card_id.into_sql_value()])?
            .is_some();
        if !card_exists {
            return Err(MtgManagerError::NotFound(format!("Card {card_id} not found")));
        }

        let (sql, params) = SqlBuilder::select("deck_cards")
            .columns(&["id", "quantity"])
            .where_eq("deck_id", deck_id)
            .where_eq("card_id", card_id)
            .where_eq("sideboard", sideboard)
            .limit(1)
            .build();
        let existing = self.conn.execute(&sql, &params)?.into_iter().next().and_then(|r| {
            let id = r.get("id")?.as_str()?.to_string();
            let quantity = r.get("quantity")?.as_i64()?;
            Some((id, quantity))
        });

        let slot_id = match existing {
            Some((slot_id, owned)) => {
                if let Some((sql, params)) = UpdateBuilder::table("deck_cards")
                    .set("quantity", owned + quantity)
                    .where_eq("id", &slot_id)
                    .build()
                {
                    self.conn.execute_statement(&sql, &params)?;
                }
                slot_id
            }
            None => {
                let slot_id = uuid::Uuid::new_v4().to_string();
                let (sql, params) = InsertBuilder::table("deck_cards")
                    .value("id", &slot_id)
                    .value("deck_id", deck_id)
                    .value("card_id", card_id)
                    .value("quantity", quantity)
                    .value("sideboard", sideboard)
                    .build();
                self.conn.execute_statement(&sql, &params)?;
                slot_id
            }
        };
        log::debug!("Deck {deck_id}: +{quantity} {card_id} (sideboard={sideboard})");

        let (sql, params) = deck_card_select().where_eq("dc.id", &slot_id).build();
        let cards: Vec<DeckCard> = self.conn.execute_into(&sql, &params)?;
        cards
            .into_iter()
            .next()
            .ok_or_else(|| MtgManagerError::NotFound(format!("Deck slot {slot_id} not found")))
    }

    /// Card slots of a deck: main board first, then by card name.
    pub fn cards(&self, user: &User, deck_id: &str) -> Result<Vec<DeckCard>> {
        self.get(user, deck_id)?;
        let (sql, params) = deck_card_select()
            .where_eq("dc.deck_id", deck_id)
            .order_by(&["dc.sideboard ASC", "c.name ASC"])
            .build();
        self.conn.execute_into(&sql, &params)
    }

    /// Delete a deck and its slots.
    pub fn delete(&self, user: &User, deck_id: &str) -> Result<()> {
        self.get(user, deck_id)?;
        self.conn.execute_statement(
            "DELETE FROM deck_cards WHERE deck_id = ?",
            &[deck_id.into_sql_value()],
        )?;
        self.conn.execute_statement(
            "DELETE FROM decks WHERE id = ? AND user_id = ?",
            &[deck_id.into_sql_value(), user.id.as_str().into_sql_value()],
        )?;
        log::info!("Deleted deck {deck_id} of {}", user.id);
        Ok(())
    }
}

fn deck_select() -> SqlBuilder {
    let mut qb = SqlBuilder::select("decks d");
    qb.columns(DECK_COLUMNS)
        .join("LEFT JOIN deck_cards dc ON dc.deck_id = d.id");
    qb
}

fn deck_card_select() -> SqlBuilder {
    let mut columns = vec!["dc.id AS deck_card_id", "dc.quantity", "dc.sideboard"];
    columns.extend_from_slice(CARD_COLUMNS);
    let mut qb = SqlBuilder::select("deck_cards dc");
    qb.columns(&columns).join("JOIN cards c ON c.id = dc.card_id");
    qb
}
