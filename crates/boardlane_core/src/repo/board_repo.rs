//! Board repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over `boards` storage.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Titles are persisted in trimmed, non-blank form.
//! - Board deletion cascades to the board's tasks inside one transaction,
//!   so no task row ever references a missing board.

use crate::db::DbError;
use crate::model::board::{Board, BoardId};
use crate::model::payload::normalize_title;
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};

const BOARD_SELECT_SQL: &str = "SELECT
    id,
    title,
    created_at,
    updated_at
FROM boards";

pub type BoardRepoResult<T> = Result<T, BoardRepoError>;

/// Errors from board persistence operations.
#[derive(Debug)]
pub enum BoardRepoError {
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// Target board does not exist.
    BoardNotFound(BoardId),
    /// Title is blank after trimming.
    BlankTitle,
    /// Persisted data cannot be converted to a valid read model.
    InvalidData(String),
}

impl Display for BoardRepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::BoardNotFound(id) => write!(f, "board not found: {id}"),
            Self::BlankTitle => write!(f, "board title must not be blank"),
            Self::InvalidData(message) => write!(f, "invalid persisted board data: {message}"),
        }
    }
}

impl Error for BoardRepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::BoardNotFound(_) | Self::BlankTitle | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for BoardRepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for BoardRepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for board CRUD operations.
pub trait BoardRepository {
    /// Creates one board from a trimmed title.
    fn create_board(&self, title: &str) -> BoardRepoResult<Board>;
    /// Loads one board by id.
    fn get_board(&self, board_id: BoardId) -> BoardRepoResult<Option<Board>>;
    /// Lists all boards ordered by id.
    fn list_boards(&self) -> BoardRepoResult<Vec<Board>>;
    /// Renames one board.
    fn rename_board(&self, board_id: BoardId, title: &str) -> BoardRepoResult<()>;
    /// Deletes one board and every task it owns.
    fn delete_board(&self, board_id: BoardId) -> BoardRepoResult<()>;
}

/// SQLite-backed board repository.
pub struct SqliteBoardRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBoardRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl BoardRepository for SqliteBoardRepository<'_> {
    fn create_board(&self, title: &str) -> BoardRepoResult<Board> {
        let title = normalize_title(title).ok_or(BoardRepoError::BlankTitle)?;
        self.conn.execute(
            "INSERT INTO boards (title) VALUES (?1);",
            [title.as_str()],
        )?;
        let board_id = self.conn.last_insert_rowid();
        load_required_board(self.conn, board_id)
    }

    fn get_board(&self, board_id: BoardId) -> BoardRepoResult<Option<Board>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BOARD_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([board_id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_board_row(row)?));
        }
        Ok(None)
    }

    fn list_boards(&self) -> BoardRepoResult<Vec<Board>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BOARD_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut boards = Vec::new();
        while let Some(row) = rows.next()? {
            boards.push(parse_board_row(row)?);
        }
        Ok(boards)
    }

    fn rename_board(&self, board_id: BoardId, title: &str) -> BoardRepoResult<()> {
        let title = normalize_title(title).ok_or(BoardRepoError::BlankTitle)?;
        let changed = self.conn.execute(
            "UPDATE boards
             SET title = ?2,
                 updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?1;",
            params![board_id, title.as_str()],
        )?;
        if changed == 0 {
            return Err(BoardRepoError::BoardNotFound(board_id));
        }
        Ok(())
    }

    fn delete_board(&self, board_id: BoardId) -> BoardRepoResult<()> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;

        // Tasks go first so the board row never dangles mid-transaction.
        tx.execute("DELETE FROM tasks WHERE board_id = ?1;", [board_id])?;
        let changed = tx.execute("DELETE FROM boards WHERE id = ?1;", [board_id])?;
        if changed == 0 {
            return Err(BoardRepoError::BoardNotFound(board_id));
        }

        tx.commit()?;
        Ok(())
    }
}

fn load_required_board(conn: &Connection, board_id: BoardId) -> BoardRepoResult<Board> {
    let mut stmt = conn.prepare(&format!("{BOARD_SELECT_SQL} WHERE id = ?1;"))?;
    let mut rows = stmt.query([board_id])?;
    if let Some(row) = rows.next()? {
        return parse_board_row(row);
    }
    Err(BoardRepoError::BoardNotFound(board_id))
}

fn parse_board_row(row: &Row<'_>) -> BoardRepoResult<Board> {
    let id: i64 = row.get("id")?;
    if id <= 0 {
        return Err(BoardRepoError::InvalidData(format!(
            "non-positive id `{id}` in boards.id"
        )));
    }
    Ok(Board {
        id,
        title: row.get("title")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}
