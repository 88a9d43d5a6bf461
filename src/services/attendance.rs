use crate::{
    db::DbPool,
    entities::{
        attendance_record::{self, Entity as AttendanceRecord},
        user::{self, Entity as User},
    },
    errors::ServiceError,
    events::{Event, EventSender},
};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;

/// One calendar day in a range report: either the day's record or an
/// absence placeholder.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReportDay {
    pub date: NaiveDate,
    pub absent: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_in: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_out: Option<DateTime<Utc>>,
}

/// Gap-filled attendance report over an inclusive date range.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RangeReport {
    pub rut: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub days: Vec<ReportDay>,
    pub absences: u32,
    /// Worked hours summed over non-absent days, fractional.
    pub worked_hours: f64,
}

#[derive(Clone)]
pub struct AttendanceService {
    db_pool: Arc<DbPool>,
    event_sender: EventSender,
}

impl AttendanceService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: EventSender) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Open a new attendance record. Rejected while the worker already has
    /// an open record (checked in, not yet out).
    #[instrument(skip(self))]
    pub async fn check_in(&self, rut: &str) -> Result<attendance_record::Model, ServiceError> {
        let db = self.db_pool.as_ref();
        self.require_user(rut).await?;

        let open = AttendanceRecord::find()
            .filter(attendance_record::Column::Rut.eq(rut))
            .filter(attendance_record::Column::CheckOut.is_null())
            .one(db)
            .await?;
        if open.is_some() {
            return Err(ServiceError::Conflict(format!(
                "{} is already checked in",
                rut
            )));
        }

        let now = Utc::now();
        let record = attendance_record::ActiveModel {
            id: Set(Uuid::new_v4()),
            rut: Set(rut.to_string()),
            check_in: Set(now),
            check_out: Set(None),
            created_at: Set(now),
        }
        .insert(db)
        .await?;

        self.event_sender
            .send(Event::AttendanceCheckedIn {
                rut: rut.to_string(),
            })
            .await
            .map_err(ServiceError::EventError)?;
        info!(%rut, "check-in registered");
        Ok(record)
    }

    /// Close the worker's open record.
    #[instrument(skip(self))]
    pub async fn check_out(&self, rut: &str) -> Result<attendance_record::Model, ServiceError> {
        let db = self.db_pool.as_ref();
        self.require_user(rut).await?;

        let open = AttendanceRecord::find()
            .filter(attendance_record::Column::Rut.eq(rut))
            .filter(attendance_record::Column::CheckOut.is_null())
            .order_by_desc(attendance_record::Column::CheckIn)
            .one(db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("No open attendance record for {}", rut))
            })?;

        let mut model: attendance_record::ActiveModel = open.into();
        model.check_out = Set(Some(Utc::now()));
        let record = model.update(db).await?;

        self.event_sender
            .send(Event::AttendanceCheckedOut {
                rut: rut.to_string(),
            })
            .await
            .map_err(ServiceError::EventError)?;
        info!(%rut, "check-out registered");
        Ok(record)
    }

    /// Most recent record for the worker.
    #[instrument(skip(self))]
    pub async fn last(&self, rut: &str) -> Result<attendance_record::Model, ServiceError> {
        AttendanceRecord::find()
            .filter(attendance_record::Column::Rut.eq(rut))
            .order_by_desc(attendance_record::Column::CheckIn)
            .one(self.db_pool.as_ref())
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("No attendance records for {}", rut))
            })
    }

    /// Raw records whose check-in falls inside the inclusive range.
    #[instrument(skip(self))]
    pub async fn records(
        &self,
        rut: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<attendance_record::Model>, ServiceError> {
        validate_range(start, end)?;
        let from = day_start(start);
        let to = day_start(end + chrono::Days::new(1));
        let records = AttendanceRecord::find()
            .filter(attendance_record::Column::Rut.eq(rut))
            .filter(attendance_record::Column::CheckIn.gte(from))
            .filter(attendance_record::Column::CheckIn.lt(to))
            .order_by_asc(attendance_record::Column::CheckIn)
            .all(self.db_pool.as_ref())
            .await?;
        Ok(records)
    }

    /// The gap-filled range report; see [`build_range_report`].
    #[instrument(skip(self))]
    pub async fn report(
        &self,
        rut: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<RangeReport, ServiceError> {
        let records = self.records(rut, start, end).await?;
        Ok(build_range_report(rut, start, end, &records))
    }

    async fn require_user(&self, rut: &str) -> Result<user::Model, ServiceError> {
        User::find()
            .filter(user::Column::Rut.eq(rut))
            .one(self.db_pool.as_ref())
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("No user with RUT {}", rut)))
    }
}

fn validate_range(start: NaiveDate, end: NaiveDate) -> Result<(), ServiceError> {
    if start > end {
        return Err(ServiceError::ValidationError(
            "start date must not be after end date".into(),
        ));
    }
    Ok(())
}

fn day_start(date: NaiveDate) -> DateTime<Utc> {
    DateTime::from_naive_utc_and_offset(date.and_time(NaiveTime::MIN), Utc)
}

/// Walk every calendar day in `[start, end]` inclusive. A day with a record
/// is emitted as-is; a day without one becomes an absence placeholder.
/// Worked hours accumulate only over non-absent days as
/// `check_out - check_in` in fractional hours, a missing check-out counting
/// as equal to check-in. When several records share a day, the earliest
/// check-in wins.
pub fn build_range_report(
    rut: &str,
    start: NaiveDate,
    end: NaiveDate,
    records: &[attendance_record::Model],
) -> RangeReport {
    let mut by_day: HashMap<NaiveDate, &attendance_record::Model> = HashMap::new();
    for record in records {
        by_day
            .entry(record.check_in.date_naive())
            .or_insert(record);
    }

    let mut days = Vec::new();
    let mut absences = 0u32;
    let mut worked_hours = 0f64;

    let mut date = start;
    while date <= end {
        match by_day.get(&date) {
            Some(record) => {
                let check_out = record.check_out.unwrap_or(record.check_in);
                let seconds = (check_out - record.check_in).num_seconds().max(0);
                worked_hours += seconds as f64 / 3600.0;
                days.push(ReportDay {
                    date,
                    absent: false,
                    check_in: Some(record.check_in),
                    check_out: record.check_out,
                });
            }
            None => {
                absences += 1;
                days.push(ReportDay {
                    date,
                    absent: true,
                    check_in: None,
                    check_out: None,
                });
            }
        }
        date = date + chrono::Days::new(1);
    }

    RangeReport {
        rut: rut.to_string(),
        start,
        end,
        days,
        absences,
        worked_hours,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone};

    fn record(day: NaiveDate, in_h: u32, out_h: Option<u32>) -> attendance_record::Model {
        let check_in = Utc
            .with_ymd_and_hms(day.year(), day.month(), day.day(), in_h, 0, 0)
            .unwrap();
        attendance_record::Model {
            id: Uuid::new_v4(),
            rut: "11111111-1".into(),
            check_in,
            check_out: out_h.map(|h| {
                Utc.with_ymd_and_hms(day.year(), day.month(), day.day(), h, 30, 0)
                    .unwrap()
            }),
            created_at: check_in,
        }
    }

    #[test]
    fn fills_gaps_over_the_inclusive_range() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
        let records = vec![record(
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            8,
            Some(17),
        )];

        let report = build_range_report("11111111-1", start, end, &records);

        assert_eq!(report.days.len(), 3);
        assert!(report.days[0].absent);
        assert!(!report.days[1].absent);
        assert!(report.days[2].absent);
        assert_eq!(report.absences, 2);
        assert!((report.worked_hours - 9.5).abs() < 1e-9);
    }

    #[test]
    fn missing_check_out_contributes_zero_hours() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let report = build_range_report("11111111-1", day, day, &[record(day, 9, None)]);
        assert_eq!(report.absences, 0);
        assert_eq!(report.worked_hours, 0.0);
        assert!(!report.days[0].absent);
    }

    #[test]
    fn single_day_range_without_records_is_one_absence() {
        let day = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let report = build_range_report("11111111-1", day, day, &[]);
        assert_eq!(report.days.len(), 1);
        assert_eq!(report.absences, 1);
        assert_eq!(report.worked_hours, 0.0);
    }
}
