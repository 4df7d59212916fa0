//! SQLite persistence layer.
//!
//! RULE: Only store.rs talks to the database.
//! Operations call store methods; they never execute SQL directly.
//! Every mutation is a single conditional statement, so each account
//! update is atomic at the store level.

use crate::{
    account::{Account, BonusState},
    error::WalletResult,
    types::{AccountId, Amount},
};
use chrono::DateTime;
use rusqlite::{params, Connection, OptionalExtension, Row};

pub struct WalletStore {
    conn: Connection,
}

impl WalletStore {
    /// Open (or create) the wallet database at `path`.
    pub fn open(path: &str) -> WalletResult<Self> {
        let conn = Connection::open(path)?;
        // WAL mode only for real files (:memory: ignores it).
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> WalletResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> WalletResult<()> {
        self.conn
            .execute_batch(include_str!("../migrations/001_accounts.sql"))?;
        Ok(())
    }

    // ── Account rows ───────────────────────────────────────────

    pub fn insert_account(&self, account: &Account) -> WalletResult<()> {
        self.conn.execute(
            "INSERT INTO account (account_id, first_name, last_name, email, phone,
                                  password, referred_by, referrals_count, balance,
                                  last_purchase_at, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                account.account_id,
                account.first_name,
                account.last_name,
                account.email,
                account.phone,
                account.password,
                account.referred_by,
                account.referrals_count,
                account.balance,
                account.bonus_state.as_timestamp(),
                account.created_at.timestamp(),
            ],
        )?;
        Ok(())
    }

    pub fn find_account(&self, account_id: &str) -> WalletResult<Option<Account>> {
        self.conn
            .query_row(
                "SELECT account_id, first_name, last_name, email, phone, password,
                        referred_by, referrals_count, balance, last_purchase_at, created_at
                 FROM account WHERE account_id = ?1",
                params![account_id],
                account_row_mapper,
            )
            .optional()
            .map_err(Into::into)
    }

    pub fn find_by_phone(&self, phone: &str) -> WalletResult<Option<Account>> {
        self.conn
            .query_row(
                "SELECT account_id, first_name, last_name, email, phone, password,
                        referred_by, referrals_count, balance, last_purchase_at, created_at
                 FROM account WHERE phone = ?1",
                params![phone],
                account_row_mapper,
            )
            .optional()
            .map_err(Into::into)
    }

    pub fn identity_exists(&self, email: &str, phone: &str) -> WalletResult<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM account WHERE email = ?1 OR phone = ?2",
            params![email, phone],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    // ── Referral linkage ───────────────────────────────────────

    /// Set the referrer on `target` if it has none yet.
    /// Returns false when the target is already referred (or missing).
    pub fn set_referrer(&self, target_id: &str, referrer_id: &str) -> WalletResult<bool> {
        let rows = self.conn.execute(
            "UPDATE account SET referred_by = ?1
             WHERE account_id = ?2 AND referred_by IS NULL",
            params![referrer_id, target_id],
        )?;
        Ok(rows > 0)
    }

    /// Credit one referral to the referrer: count +1, balance +bonus.
    pub fn credit_referral(&self, referrer_id: &str, bonus: Amount) -> WalletResult<bool> {
        let rows = self.conn.execute(
            "UPDATE account
             SET referrals_count = referrals_count + 1, balance = balance + ?1
             WHERE account_id = ?2",
            params![bonus, referrer_id],
        )?;
        Ok(rows > 0)
    }

    // ── Wallet mutations ───────────────────────────────────────

    pub fn credit_balance(&self, account_id: &str, amount: Amount) -> WalletResult<bool> {
        let rows = self.conn.execute(
            "UPDATE account SET balance = balance + ?1 WHERE account_id = ?2",
            params![amount, account_id],
        )?;
        Ok(rows > 0)
    }

    /// Deduct `price` and arm the bonus timer unless it is already armed.
    /// Funds check, deduction, and arming happen in one statement; a
    /// matched row means the purchase went through.
    pub fn debit_for_purchase(
        &self,
        account_id: &str,
        price: Amount,
        now_ts: i64,
    ) -> WalletResult<bool> {
        let rows = self.conn.execute(
            "UPDATE account
             SET balance = balance - ?1,
                 last_purchase_at = COALESCE(last_purchase_at, ?2)
             WHERE account_id = ?3 AND balance >= ?1",
            params![price, now_ts, account_id],
        )?;
        Ok(rows > 0)
    }

    pub fn account_balance(&self, account_id: &str) -> WalletResult<Amount> {
        self.conn
            .query_row(
                "SELECT balance FROM account WHERE account_id = ?1",
                params![account_id],
                |row| row.get(0),
            )
            .map_err(Into::into)
    }

    // ── Bonus sweep ────────────────────────────────────────────

    /// Every account with the bonus timer armed: (account_id, armed-since).
    pub fn armed_accounts(&self) -> WalletResult<Vec<(AccountId, i64)>> {
        let mut stmt = self.conn.prepare(
            "SELECT account_id, last_purchase_at FROM account
             WHERE last_purchase_at IS NOT NULL
             ORDER BY account_id ASC",
        )?;
        let rows = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Pay the percentage bonus on the current balance and disarm the
    /// timer in the same statement. The IS NOT NULL guard makes a repeat
    /// application a no-op.
    pub fn apply_bonus(&self, account_id: &str, rate: f64) -> WalletResult<bool> {
        let rows = self.conn.execute(
            "UPDATE account
             SET balance = balance + balance * ?1, last_purchase_at = NULL
             WHERE account_id = ?2 AND last_purchase_at IS NOT NULL",
            params![rate, account_id],
        )?;
        Ok(rows > 0)
    }

    // ── Test helpers ───────────────────────────────────────────

    pub fn account_count(&self) -> WalletResult<i64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM account", [], |row| row.get(0))
            .map_err(Into::into)
    }
}

fn account_row_mapper(row: &Row) -> rusqlite::Result<Account> {
    Ok(Account {
        account_id: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        email: row.get(3)?,
        phone: row.get(4)?,
        password: row.get(5)?,
        referred_by: row.get(6)?,
        referrals_count: row.get(7)?,
        balance: row.get(8)?,
        bonus_state: BonusState::from_timestamp(row.get(9)?),
        created_at: DateTime::from_timestamp(row.get(10)?, 0).unwrap_or_default(),
    })
}
