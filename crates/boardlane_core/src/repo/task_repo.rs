//! Task repository contracts and SQLite implementation.
//!
//! This is the position ledger: the only writer of `tasks.position`.
//!
//! # Responsibility
//! - Provide create/delete/swap/move/relocate operations over ordered tasks.
//! - Keep SQL details and position bookkeeping inside the repository
//!   boundary.
//!
//! # Invariants
//! - Positions within one board are dense and zero-based (`{0..n-1}`) at
//!   the start and end of every operation; transient gaps exist only inside
//!   an uncommitted transaction.
//! - Every mutating operation is one immediate transaction: it commits
//!   fully or leaves the store untouched.
//! - Task listing is deterministic: `position ASC, id ASC`.
//! - Swaps exchange raw position values and do not require both tasks to
//!   share a board; same-board policy lives in the service layer.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::board::BoardId;
use crate::model::payload::normalize_title;
use crate::model::task::{Task, TaskId};
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};

const TASK_SELECT_SQL: &str = "SELECT
    id,
    title,
    position,
    board_id,
    created_at,
    updated_at
FROM tasks";

pub type TaskRepoResult<T> = Result<T, TaskRepoError>;

/// Errors from task repository operations.
#[derive(Debug)]
pub enum TaskRepoError {
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// Target task does not exist.
    TaskNotFound(TaskId),
    /// Referenced board does not exist.
    BoardNotFound(BoardId),
    /// Position is outside the valid range for the board.
    PositionOutOfRange { position: i64, count: i64 },
    /// Relocation target equals the task's current board.
    SameBoard(BoardId),
    /// Title is blank after trimming.
    BlankTitle,
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Required column is missing from expected table.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    /// Persisted data cannot be converted to a valid read model.
    InvalidData(String),
}

impl Display for TaskRepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
            Self::BoardNotFound(id) => write!(f, "board not found: {id}"),
            Self::PositionOutOfRange { position, count } => write!(
                f,
                "position {position} is out of range for board with {count} tasks"
            ),
            Self::SameBoard(id) => write!(f, "task is already in board {id}"),
            Self::BlankTitle => write!(f, "task title must not be blank"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "task repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "task repository requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "task repository requires column `{column}` in table `{table}`"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted task data: {message}"),
        }
    }
}

impl Error for TaskRepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for TaskRepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for TaskRepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for ordered task operations.
pub trait TaskRepository {
    /// Creates one task, appending by default or inserting at an explicit
    /// position with `0 <= position <= count`.
    fn create_task(
        &self,
        title: &str,
        position: Option<i64>,
        board_id: BoardId,
    ) -> TaskRepoResult<Task>;
    /// Deletes one task and closes the gap it leaves behind.
    fn delete_task(&self, task_id: TaskId) -> TaskRepoResult<()>;
    /// Exchanges the stored positions of two tasks.
    fn swap_positions(&self, first_id: TaskId, second_id: TaskId) -> TaskRepoResult<()>;
    /// Moves one task to an explicit position within its board.
    fn move_within_board(&self, task_id: TaskId, new_position: i64) -> TaskRepoResult<()>;
    /// Moves one task into another board at an optional explicit position.
    fn relocate_to_board(
        &self,
        task_id: TaskId,
        target_board_id: BoardId,
        target_position: Option<i64>,
    ) -> TaskRepoResult<Task>;
    /// Loads one task by id.
    fn get_task(&self, task_id: TaskId) -> TaskRepoResult<Option<Task>>;
    /// Lists one board's tasks in display order.
    fn list_board_tasks(&self, board_id: BoardId) -> TaskRepoResult<Vec<Task>>;
    /// Renames one task.
    fn rename_task(&self, task_id: TaskId, title: &str) -> TaskRepoResult<()>;
}

/// SQLite-backed task repository.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    /// Creates a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> TaskRepoResult<Self> {
        ensure_ledger_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn create_task(
        &self,
        title: &str,
        position: Option<i64>,
        board_id: BoardId,
    ) -> TaskRepoResult<Task> {
        let title = normalize_title(title).ok_or(TaskRepoError::BlankTitle)?;

        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        ensure_board_exists(&tx, board_id)?;

        let count = board_task_count(&tx, board_id)?;
        let insert_position = match position {
            Some(position) => {
                // Insert-at-end (position == count) is allowed.
                if position < 0 || position > count {
                    return Err(TaskRepoError::PositionOutOfRange { position, count });
                }
                position
            }
            None => count,
        };

        if insert_position < count {
            // Shift successors up in one bulk statement. The schema declares
            // no UNIQUE(board_id, position), so the interim row states inside
            // this transaction cannot trip a store-level constraint.
            tx.execute(
                "UPDATE tasks
                 SET position = position + 1,
                     updated_at = (strftime('%s', 'now') * 1000)
                 WHERE board_id = ?1
                   AND position >= ?2;",
                params![board_id, insert_position],
            )?;
        }

        tx.execute(
            "INSERT INTO tasks (title, position, board_id) VALUES (?1, ?2, ?3);",
            params![title.as_str(), insert_position, board_id],
        )?;
        let task_id = tx.last_insert_rowid();

        let task = load_required_task(&tx, task_id)?;
        tx.commit()?;
        Ok(task)
    }

    fn delete_task(&self, task_id: TaskId) -> TaskRepoResult<()> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let task = load_required_task(&tx, task_id)?;

        tx.execute("DELETE FROM tasks WHERE id = ?1;", [task_id])?;
        // Close the gap; other boards must stay untouched.
        tx.execute(
            "UPDATE tasks
             SET position = position - 1,
                 updated_at = (strftime('%s', 'now') * 1000)
             WHERE board_id = ?1
               AND position > ?2;",
            params![task.board_id, task.position],
        )?;

        tx.commit()?;
        Ok(())
    }

    fn swap_positions(&self, first_id: TaskId, second_id: TaskId) -> TaskRepoResult<()> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let first = load_required_task(&tx, first_id)?;
        let second = load_required_task(&tx, second_id)?;

        set_task_position(&tx, first.id, second.position)?;
        set_task_position(&tx, second.id, first.position)?;

        tx.commit()?;
        Ok(())
    }

    fn move_within_board(&self, task_id: TaskId, new_position: i64) -> TaskRepoResult<()> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let task = load_required_task(&tx, task_id)?;

        let count = board_task_count(&tx, task.board_id)?;
        if new_position < 0 || new_position >= count {
            return Err(TaskRepoError::PositionOutOfRange {
                position: new_position,
                count,
            });
        }
        if new_position == task.position {
            // Identity move: no rows touched.
            return Ok(());
        }

        if new_position < task.position {
            // Moving earlier: bump the intervening range up by one.
            tx.execute(
                "UPDATE tasks
                 SET position = position + 1,
                     updated_at = (strftime('%s', 'now') * 1000)
                 WHERE board_id = ?1
                   AND position >= ?2
                   AND position < ?3;",
                params![task.board_id, new_position, task.position],
            )?;
        } else {
            // Moving later: pull the intervening range down by one.
            tx.execute(
                "UPDATE tasks
                 SET position = position - 1,
                     updated_at = (strftime('%s', 'now') * 1000)
                 WHERE board_id = ?1
                   AND position > ?2
                   AND position <= ?3;",
                params![task.board_id, task.position, new_position],
            )?;
        }

        set_task_position(&tx, task.id, new_position)?;
        tx.commit()?;
        Ok(())
    }

    fn relocate_to_board(
        &self,
        task_id: TaskId,
        target_board_id: BoardId,
        target_position: Option<i64>,
    ) -> TaskRepoResult<Task> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let task = load_required_task(&tx, task_id)?;
        ensure_board_exists(&tx, target_board_id)?;

        if task.board_id == target_board_id {
            return Err(TaskRepoError::SameBoard(target_board_id));
        }

        let final_position = match target_position {
            // An explicit target position is taken as-is and not clamped to
            // the target board's count; a trailing gap is the caller's
            // decision to make. Only the sign is re-checked here.
            Some(position) => {
                if position < 0 {
                    return Err(TaskRepoError::PositionOutOfRange {
                        position,
                        count: board_task_count(&tx, target_board_id)?,
                    });
                }
                position
            }
            None => board_task_count(&tx, target_board_id)?,
        };

        tx.execute(
            "UPDATE tasks
             SET board_id = ?2,
                 position = ?3,
                 updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?1;",
            params![task.id, target_board_id, final_position],
        )?;

        // Renumber the source board's survivors 0..k-1 in position order.
        // This closes the gap and re-densifies even if prior drift existed.
        let survivor_ids = list_board_task_ids(&tx, task.board_id)?;
        for (index, survivor_id) in survivor_ids.into_iter().enumerate() {
            set_task_position(&tx, survivor_id, index as i64)?;
        }

        let relocated = load_required_task(&tx, task.id)?;
        tx.commit()?;
        Ok(relocated)
    }

    fn get_task(&self, task_id: TaskId) -> TaskRepoResult<Option<Task>> {
        get_task_row(self.conn, task_id)
    }

    fn list_board_tasks(&self, board_id: BoardId) -> TaskRepoResult<Vec<Task>> {
        let mut stmt = self.conn.prepare(&format!(
            "{TASK_SELECT_SQL}
             WHERE board_id = ?1
             ORDER BY position ASC, id ASC;"
        ))?;
        let mut rows = stmt.query([board_id])?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }
        Ok(tasks)
    }

    fn rename_task(&self, task_id: TaskId, title: &str) -> TaskRepoResult<()> {
        let title = normalize_title(title).ok_or(TaskRepoError::BlankTitle)?;
        let changed = self.conn.execute(
            "UPDATE tasks
             SET title = ?2,
                 updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?1;",
            params![task_id, title.as_str()],
        )?;
        if changed == 0 {
            return Err(TaskRepoError::TaskNotFound(task_id));
        }
        Ok(())
    }
}

fn set_task_position(conn: &Connection, task_id: TaskId, position: i64) -> TaskRepoResult<()> {
    conn.execute(
        "UPDATE tasks
         SET position = ?2,
             updated_at = (strftime('%s', 'now') * 1000)
         WHERE id = ?1;",
        params![task_id, position],
    )?;
    Ok(())
}

fn get_task_row(conn: &Connection, task_id: TaskId) -> TaskRepoResult<Option<Task>> {
    let mut stmt = conn.prepare(&format!("{TASK_SELECT_SQL} WHERE id = ?1;"))?;
    let mut rows = stmt.query([task_id])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(parse_task_row(row)?));
    }
    Ok(None)
}

fn load_required_task(conn: &Connection, task_id: TaskId) -> TaskRepoResult<Task> {
    get_task_row(conn, task_id)?.ok_or(TaskRepoError::TaskNotFound(task_id))
}

fn ensure_board_exists(conn: &Connection, board_id: BoardId) -> TaskRepoResult<()> {
    let exists: Option<i64> = conn
        .query_row("SELECT id FROM boards WHERE id = ?1;", [board_id], |row| {
            row.get(0)
        })
        .optional()?;
    if exists.is_none() {
        return Err(TaskRepoError::BoardNotFound(board_id));
    }
    Ok(())
}

fn board_task_count(conn: &Connection, board_id: BoardId) -> TaskRepoResult<i64> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM tasks WHERE board_id = ?1;",
        [board_id],
        |row| row.get(0),
    )?;
    Ok(count)
}

fn list_board_task_ids(conn: &Connection, board_id: BoardId) -> TaskRepoResult<Vec<TaskId>> {
    let mut stmt = conn.prepare(
        "SELECT id
         FROM tasks
         WHERE board_id = ?1
         ORDER BY position ASC, id ASC;",
    )?;
    let mut rows = stmt.query([board_id])?;
    let mut ids = Vec::new();
    while let Some(row) = rows.next()? {
        ids.push(row.get(0)?);
    }
    Ok(ids)
}

fn parse_task_row(row: &Row<'_>) -> TaskRepoResult<Task> {
    let id: i64 = row.get("id")?;
    if id <= 0 {
        return Err(TaskRepoError::InvalidData(format!(
            "non-positive id `{id}` in tasks.id"
        )));
    }
    let position: i64 = row.get("position")?;
    if position < 0 {
        return Err(TaskRepoError::InvalidData(format!(
            "negative position `{position}` in tasks.position"
        )));
    }
    let board_id: i64 = row.get("board_id")?;
    if board_id <= 0 {
        return Err(TaskRepoError::InvalidData(format!(
            "non-positive board reference `{board_id}` in tasks.board_id"
        )));
    }
    Ok(Task {
        id,
        title: row.get("title")?,
        position,
        board_id,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

fn ensure_ledger_connection_ready(conn: &Connection) -> TaskRepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(TaskRepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for table in ["boards", "tasks"] {
        if !table_exists(conn, table)? {
            return Err(TaskRepoError::MissingRequiredTable(table));
        }
    }

    for column in [
        "id",
        "title",
        "position",
        "board_id",
        "created_at",
        "updated_at",
    ] {
        if !table_has_column(conn, "tasks", column)? {
            return Err(TaskRepoError::MissingRequiredColumn {
                table: "tasks",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> TaskRepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> TaskRepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
