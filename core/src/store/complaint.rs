use super::{bad_label, PortalStore};
use crate::{
    actor::UserRef,
    complaint::{Category, ComplaintFilter, ComplaintRecord, Priority, Status},
    error::PortalResult,
};
use chrono::{DateTime, Utc};
use rusqlite::{params, params_from_iter, OptionalExtension};

const COMPLAINT_COLUMNS: &str = "complaint_id, student_id, student_name, title, description,
        category, priority, status, admin_remark, hostel_block, room_number,
        created_at, resolved_at, resolved_by_id, resolved_by_name";

fn complaint_row_mapper(row: &rusqlite::Row<'_>) -> rusqlite::Result<ComplaintRecord> {
    let category: String = row.get(5)?;
    let priority: String = row.get(6)?;
    let status: String = row.get(7)?;

    let resolved_by_id: Option<String> = row.get(13)?;
    let resolved_by_name: Option<String> = row.get(14)?;
    let resolved_by = match (resolved_by_id, resolved_by_name) {
        (Some(id), Some(name)) => Some(UserRef { id, name }),
        _ => None,
    };

    Ok(ComplaintRecord {
        complaint_id: row.get(0)?,
        student: UserRef {
            id: row.get(1)?,
            name: row.get(2)?,
        },
        title: row.get(3)?,
        description: row.get(4)?,
        category: Category::from_label(&category).ok_or_else(|| bad_label(5, &category))?,
        priority: Priority::from_label(&priority).ok_or_else(|| bad_label(6, &priority))?,
        status: Status::from_label(&status).ok_or_else(|| bad_label(7, &status))?,
        admin_remark: row.get(8)?,
        hostel_block: row.get(9)?,
        room_number: row.get(10)?,
        created_at: row.get::<_, DateTime<Utc>>(11)?,
        resolved_at: row.get::<_, Option<DateTime<Utc>>>(12)?,
        resolved_by,
    })
}

impl PortalStore {
    // ── Complaint ──────────────────────────────────────────────────

    pub fn insert_complaint(&self, c: &ComplaintRecord) -> PortalResult<()> {
        self.conn.execute(
            "INSERT INTO complaint (
                complaint_id, student_id, student_name, title, description,
                category, priority, status, admin_remark, hostel_block, room_number,
                created_at, resolved_at, resolved_by_id, resolved_by_name
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
            params![
                &c.complaint_id,
                &c.student.id,
                &c.student.name,
                &c.title,
                &c.description,
                c.category.as_str(),
                c.priority.as_str(),
                c.status.as_str(),
                c.admin_remark.as_deref(),
                &c.hostel_block,
                &c.room_number,
                c.created_at,
                c.resolved_at,
                c.resolved_by.as_ref().map(|u| u.id.as_str()),
                c.resolved_by.as_ref().map(|u| u.name.as_str()),
            ],
        )?;
        Ok(())
    }

    pub fn get_complaint(&self, complaint_id: &str) -> PortalResult<Option<ComplaintRecord>> {
        let sql = format!("SELECT {COMPLAINT_COLUMNS} FROM complaint WHERE complaint_id = ?1");
        self.conn
            .query_row(&sql, params![complaint_id], complaint_row_mapper)
            .optional()
            .map_err(Into::into)
    }

    /// Persist the administrator-mutable portion of a complaint. The
    /// immutable columns (student, title, description, category,
    /// created_at) are intentionally not part of this statement.
    pub fn update_complaint(&self, c: &ComplaintRecord) -> PortalResult<()> {
        self.conn.execute(
            "UPDATE complaint SET
                priority = ?1, status = ?2, admin_remark = ?3,
                resolved_at = ?4, resolved_by_id = ?5, resolved_by_name = ?6
             WHERE complaint_id = ?7",
            params![
                c.priority.as_str(),
                c.status.as_str(),
                c.admin_remark.as_deref(),
                c.resolved_at,
                c.resolved_by.as_ref().map(|u| u.id.as_str()),
                c.resolved_by.as_ref().map(|u| u.name.as_str()),
                &c.complaint_id,
            ],
        )?;
        Ok(())
    }

    pub fn complaints_for_student(&self, student_id: &str) -> PortalResult<Vec<ComplaintRecord>> {
        let sql = format!(
            "SELECT {COMPLAINT_COLUMNS} FROM complaint
             WHERE student_id = ?1
             ORDER BY created_at DESC"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![student_id], complaint_row_mapper)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Admin listing with conjunctive criteria; unset criteria match all.
    pub fn complaints_filtered(&self, filter: &ComplaintFilter) -> PortalResult<Vec<ComplaintRecord>> {
        let mut sql = format!("SELECT {COMPLAINT_COLUMNS} FROM complaint");
        let mut clauses: Vec<&str> = Vec::new();
        let mut bindings: Vec<&str> = Vec::new();

        if let Some(category) = filter.category {
            clauses.push("category = ?");
            bindings.push(category.as_str());
        }
        if let Some(status) = filter.status {
            clauses.push("status = ?");
            bindings.push(status.as_str());
        }
        if let Some(priority) = filter.priority {
            clauses.push("priority = ?");
            bindings.push(priority.as_str());
        }
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY created_at DESC");
        if let Some(limit) = filter.limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(bindings.iter()), complaint_row_mapper)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    pub fn all_complaints(&self) -> PortalResult<Vec<ComplaintRecord>> {
        self.complaints_filtered(&ComplaintFilter::default())
    }

    pub fn recent_complaints(&self, limit: usize) -> PortalResult<Vec<ComplaintRecord>> {
        self.complaints_filtered(&ComplaintFilter {
            limit: Some(limit),
            ..ComplaintFilter::default()
        })
    }
}
