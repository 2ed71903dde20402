//! A user's card collection: add, list, count, update and remove.
//!
//! Every mutation notifies the listeners handed in by the caller.

use std::sync::Arc;

use crate::connection::Connection;
use crate::error::{MtgManagerError, Result};
use crate::filter::CollectionFilterCriteria;
use crate::mana;
use crate::models::{CardCount, CopyCondition, NewCollectionCard, User, UserCardView};
use crate::notify::{CollectionChange, CollectionListener};
use crate::sql_builder::{InsertBuilder, IntoSqlValue, SqlBuilder, UpdateBuilder};

/// Card columns, unprefixed, as they appear in joined selects.
pub(crate) const CARD_COLUMNS: &[&str] = &[
    "c.id",
    "c.name",
    "c.mana_cost",
    "c.cmc",
    "c.type_line",
    "c.rarity",
    "c.set_name",
    "c.oracle_text",
    "c.power",
    "c.toughness",
    "c.image_url",
];

/// Result of [`CollectionQuery::add`].
#[derive(Debug, Clone, PartialEq)]
pub enum AddOutcome {
    /// The card was not in the collection; a new row was created.
    Added(UserCardView),
    /// The user already owned the card; its quantity was increased.
    QuantityIncreased(UserCardView),
}

impl AddOutcome {
    pub fn view(&self) -> &UserCardView {
        match self {
            AddOutcome::Added(v) | AddOutcome::QuantityIncreased(v) => v,
        }
    }

    pub fn into_view(self) -> UserCardView {
        match self {
            AddOutcome::Added(v) | AddOutcome::QuantityIncreased(v) => v,
        }
    }
}

pub struct CollectionQuery<'a> {
    conn: &'a Connection,
    listeners: &'a [Arc<dyn CollectionListener>],
}

impl<'a> CollectionQuery<'a> {
    pub fn new(conn: &'a Connection, listeners: &'a [Arc<dyn CollectionListener>]) -> Self {
        Self { conn, listeners }
    }

    // -- Reads ---------------------------------------------------------------

    /// All of the user's cards, ordered by card name.
    pub fn list(&self, user: &User) -> Result<Vec<UserCardView>> {
        let (sql, params) = view_select()
            .where_eq("uc.user_id", &user.id)
            .order_by(&["c.name ASC", "uc.id ASC"])
            .build();
        let views: Vec<UserCardView> = self.conn.execute_into(&sql, &params)?;
        log::debug!("Collection of {} has {} rows", user.id, views.len());
        Ok(views)
    }

    /// The user's cards narrowed by `criteria`, in list order.
    pub fn filtered(&self, user: &User, criteria: &CollectionFilterCriteria) -> Result<Vec<UserCardView>> {
        let mut views = self.list(user)?;
        views.retain(|v| criteria.matches(v));
        Ok(views)
    }

    /// How many copies of `card_id` the user owns, per condition row.
    pub fn card_count(&self, user: &User, card_id: &str) -> Result<CardCount> {
        if card_id.trim().is_empty() {
            return Err(MtgManagerError::InvalidArgument(
                "Card id is required".to_string(),
            ));
        }
        let (sql, params) = SqlBuilder::select("user_cards")
            .columns(&["condition", "foil", "quantity", "language"])
            .where_eq("user_id", &user.id)
            .where_eq("card_id", card_id)
            .order_by(&["id ASC"])
            .build();
        let conditions: Vec<CopyCondition> = self.conn.execute_into(&sql, &params)?;
        let total_quantity = conditions.iter().map(|c| c.quantity).sum();
        Ok(CardCount {
            total_quantity,
            conditions,
        })
    }

    // -- Mutations -----------------------------------------------------------

    /// Add copies of a card, creating the card row on first sight.
    pub fn add(&self, user: &User, new: &NewCollectionCard) -> Result<AddOutcome> {
        let card_id = new.scryfall_id.trim();
        let name = new.name.trim();
        if card_id.is_empty() || name.is_empty() {
            return Err(MtgManagerError::InvalidArgument(
                "Card id and name are required".to_string(),
            ));
        }
        let quantity = new.quantity.unwrap_or(1);
        if quantity < 1 {
            return Err(MtgManagerError::InvalidArgument(format!(
                "Quantity must be at least 1, got {quantity}"
            )));
        }

        self.ensure_card(card_id, name, new)?;

        let outcome = match self.find_owned_by_card(user, card_id)? {
            Some((row_id, owned)) => {
                log::info!("Increasing {name} in collection of {} by {quantity}", user.id);
                self.set_quantity(&row_id, owned + quantity)?;
                AddOutcome::QuantityIncreased(self.view(user, &row_id)?)
            }
            None => {
                log::info!("Adding {quantity}x {name} to collection of {}", user.id);
                let row_id = uuid::Uuid::new_v4().to_string();
                let (sql, params) = InsertBuilder::table("user_cards")
                    .value("id", &row_id)
                    .value("user_id", &user.id)
                    .value("card_id", card_id)
                    .value("quantity", quantity)
                    .build();
                self.conn.execute_statement(&sql, &params)?;
                AddOutcome::Added(self.view(user, &row_id)?)
            }
        };

        self.notify(user, CollectionChange::Added);
        Ok(outcome)
    }

    /// Set the quantity of one of the user's rows. Zero is allowed.
    pub fn update_quantity(&self, user: &User, user_card_id: &str, quantity: i64) -> Result<UserCardView> {
        if quantity < 0 {
            return Err(MtgManagerError::InvalidArgument(format!(
                "Quantity must not be negative, got {quantity}"
            )));
        }
        self.owned_quantity(user, user_card_id)?;
        self.set_quantity(user_card_id, quantity)?;
        self.notify(user, CollectionChange::QuantityChanged);
        self.view(user, user_card_id)
    }

    /// Change a row's quantity by `delta`, removing it when the result
    /// drops to zero or below. Returns the updated row, or `None` if removed.
    pub fn adjust_quantity(&self, user: &User, user_card_id: &str, delta: i64) -> Result<Option<UserCardView>> {
        let current = self.owned_quantity(user, user_card_id)?;
        let next = current + delta;
        if next <= 0 {
            self.remove(user, user_card_id)?;
            Ok(None)
        } else {
            self.update_quantity(user, user_card_id, next).map(Some)
        }
    }

    /// Delete one of the user's rows.
    pub fn remove(&self, user: &User, user_card_id: &str) -> Result<()> {
        self.owned_quantity(user, user_card_id)?;
        self.conn.execute_statement(
            "DELETE FROM user_cards WHERE id = ? AND user_id = ?",
            &[user_card_id.into_sql_value(), user.id.as_str().into_sql_value()],
        )?;
        log::info!("Removed {user_card_id} from collection of {}", user.id);
        self.notify(user, CollectionChange::Removed);
        Ok(())
    }

    // -- Helpers -------------------------------------------------------------

    fn ensure_card(&self, card_id: &str, name: &str, new: &NewCollectionCard) -> Result<()> {
        let exists = self
            .conn
            .execute_scalar("SELECT 1 FROM cards WHERE id = ?", &[card_id.into_sql_value()])?
            .is_some();
        if exists {
            return Ok(());
        }

        let mana_cost = non_blank(new.mana_cost.as_deref());
        let cmc = mana::converted_mana_cost(mana_cost);
        let rarity = non_blank(new.rarity.as_deref()).unwrap_or("common");
        let (sql, params) = InsertBuilder::table("cards")
            .value("id", card_id)
            .value("name", name)
            .value("mana_cost", mana_cost)
            .value("cmc", cmc)
            .value("type_line", non_blank(new.type_line.as_deref()))
            .value("rarity", rarity)
            .value("set_name", non_blank(new.set_name.as_deref()))
            .value("oracle_text", non_blank(new.oracle_text.as_deref()))
            .value("power", non_blank(new.power.as_deref()))
            .value("toughness", non_blank(new.toughness.as_deref()))
            .value("image_url", non_blank(new.image_url.as_deref()))
            .build();
        self.conn.execute_statement(&sql, &params)?;
        log::info!("Created card {card_id} ({name}, cmc {cmc})");
        Ok(())
    }

    fn find_owned_by_card(&self, user: &User, card_id: &str) -> Result<Option<(String, i64)>> {
        let (sql, params) = SqlBuilder::select("user_cards")
            .columns(&["id", "quantity"])
            .where_eq("user_id", &user.id)
            .where_eq("card_id", card_id)
            .order_by(&["id ASC"])
            .limit(1)
            .build();
        let row = self.conn.execute(&sql, &params)?.into_iter().next();
        Ok(row.and_then(|r| {
            let id = r.get("id")?.as_str()?.to_string();
            let quantity = r.get("quantity")?.as_i64()?;
            Some((id, quantity))
        }))
    }

    /// Quantity of a row, or `NotFound` if it does not belong to the user.
    fn owned_quantity(&self, user: &User, user_card_id: &str) -> Result<i64> {
        self.conn
            .execute_scalar(
                "SELECT quantity FROM user_cards WHERE id = ? AND user_id = ?",
                &[user_card_id.into_sql_value(), user.id.as_str().into_sql_value()],
            )?
            .and_then(|v| v.as_i64())
            .ok_or_else(|| {
                MtgManagerError::NotFound(format!("Card {user_card_id} is not in the collection"))
            })
    }

    fn set_quantity(&self, user_card_id: &str, quantity: i64) -> Result<()> {
        let (sql, params) = UpdateBuilder::table("user_cards")
            .set("quantity", quantity)
            .where_eq("id", user_card_id)
            .build()
            .ok_or_else(|| MtgManagerError::InvalidArgument("empty update".to_string()))?;
        self.conn.execute_statement(&sql, &params)?;
        Ok(())
    }

    fn view(&self, user: &User, user_card_id: &str) -> Result<UserCardView> {
        let (sql, params) = view_select()
            .where_eq("uc.id", user_card_id)
            .where_eq("uc.user_id", &user.id)
            .build();
        let views: Vec<UserCardView> = self.conn.execute_into(&sql, &params)?;
        views.into_iter().next().ok_or_else(|| {
            MtgManagerError::NotFound(format!("Card {user_card_id} is not in the collection"))
        })
    }

    fn notify(&self, user: &User, change: CollectionChange) {
        for listener in self.listeners {
            listener.collection_changed(&user.id, change);
        }
    }
}

fn view_select() -> SqlBuilder {
    let mut columns = vec![
        "uc.id AS user_card_id",
        "uc.quantity",
        "uc.condition",
        "uc.foil",
        "uc.language",
    ];
    columns.extend_from_slice(CARD_COLUMNS);
    let mut qb = SqlBuilder::select("user_cards uc");
    qb.columns(&columns).join("JOIN cards c ON c.id = uc.card_id");
    qb
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}
