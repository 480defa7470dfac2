use super::{bad_label, PortalStore};
use crate::{
    actor::UserRef,
    announcement::{AnnouncementCategory, AnnouncementPriority, AnnouncementRecord},
    error::PortalResult,
};
use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension};

const ANNOUNCEMENT_COLUMNS: &str = "announcement_id, title, description, category, priority,
        target_block, expiry_date, created_by_id, created_by_name, created_at";

fn announcement_row_mapper(row: &rusqlite::Row<'_>) -> rusqlite::Result<AnnouncementRecord> {
    let category: String = row.get(3)?;
    let priority: String = row.get(4)?;

    Ok(AnnouncementRecord {
        announcement_id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        category: AnnouncementCategory::from_label(&category)
            .ok_or_else(|| bad_label(3, &category))?,
        priority: AnnouncementPriority::from_label(&priority)
            .ok_or_else(|| bad_label(4, &priority))?,
        target_block: row.get(5)?,
        expiry_date: row.get::<_, Option<DateTime<Utc>>>(6)?,
        created_by: UserRef {
            id: row.get(7)?,
            name: row.get(8)?,
        },
        created_at: row.get::<_, DateTime<Utc>>(9)?,
    })
}

impl PortalStore {
    // ── Announcement ───────────────────────────────────────────────

    pub fn insert_announcement(&self, a: &AnnouncementRecord) -> PortalResult<()> {
        self.conn.execute(
            "INSERT INTO announcement (
                announcement_id, title, description, category, priority,
                target_block, expiry_date, created_by_id, created_by_name, created_at
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                &a.announcement_id,
                &a.title,
                &a.description,
                a.category.as_str(),
                a.priority.as_str(),
                a.target_block.as_deref(),
                a.expiry_date,
                &a.created_by.id,
                &a.created_by.name,
                a.created_at,
            ],
        )?;
        Ok(())
    }

    pub fn get_announcement(
        &self,
        announcement_id: &str,
    ) -> PortalResult<Option<AnnouncementRecord>> {
        let sql =
            format!("SELECT {ANNOUNCEMENT_COLUMNS} FROM announcement WHERE announcement_id = ?1");
        self.conn
            .query_row(&sql, params![announcement_id], announcement_row_mapper)
            .optional()
            .map_err(Into::into)
    }

    /// Replace the editable field set. Authorship and creation time are
    /// not part of this statement.
    pub fn update_announcement(&self, a: &AnnouncementRecord) -> PortalResult<()> {
        self.conn.execute(
            "UPDATE announcement SET
                title = ?1, description = ?2, category = ?3, priority = ?4,
                target_block = ?5, expiry_date = ?6
             WHERE announcement_id = ?7",
            params![
                &a.title,
                &a.description,
                a.category.as_str(),
                a.priority.as_str(),
                a.target_block.as_deref(),
                a.expiry_date,
                &a.announcement_id,
            ],
        )?;
        Ok(())
    }

    /// Returns false when no row matched.
    pub fn delete_announcement(&self, announcement_id: &str) -> PortalResult<bool> {
        let affected = self.conn.execute(
            "DELETE FROM announcement WHERE announcement_id = ?1",
            params![announcement_id],
        )?;
        Ok(affected > 0)
    }

    pub fn all_announcements(&self) -> PortalResult<Vec<AnnouncementRecord>> {
        let sql = format!(
            "SELECT {ANNOUNCEMENT_COLUMNS} FROM announcement
             ORDER BY created_at DESC"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], announcement_row_mapper)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    pub fn recent_announcements(&self, limit: usize) -> PortalResult<Vec<AnnouncementRecord>> {
        let sql = format!(
            "SELECT {ANNOUNCEMENT_COLUMNS} FROM announcement
             ORDER BY created_at DESC LIMIT ?1"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![limit as i64], announcement_row_mapper)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}
