//! GetCalendarHandler - Query handler for the month calendar.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::dashboard::{calendar_days, CalendarEntry};
use crate::domain::foundation::DateWindow;
use crate::domain::ledger::LedgerError;
use crate::ports::{Clock, MemberRepository, PaymentLedger, TenantContext};

/// Query for one calendar month.
#[derive(Debug, Clone)]
pub struct GetCalendarQuery {
    pub year: i32,
    pub month: u32,

    /// Day separating due from upcoming entries. Defaults to today.
    pub reference_date: Option<NaiveDate>,
}

/// Calendar entries keyed by day. Days without entries are absent.
pub type GetCalendarResult = BTreeMap<NaiveDate, Vec<CalendarEntry>>;

/// Handler for the dashboard calendar.
pub struct GetCalendarHandler {
    tenant: Arc<dyn TenantContext>,
    members: Arc<dyn MemberRepository>,
    payments: Arc<dyn PaymentLedger>,
    clock: Arc<dyn Clock>,
}

impl GetCalendarHandler {
    pub fn new(
        tenant: Arc<dyn TenantContext>,
        members: Arc<dyn MemberRepository>,
        payments: Arc<dyn PaymentLedger>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            tenant,
            members,
            payments,
            clock,
        }
    }

    pub async fn handle(&self, query: GetCalendarQuery) -> Result<GetCalendarResult, LedgerError> {
        let tenant_id = self.tenant.current_tenant_id()?;
        let window = DateWindow::month(query.year, query.month)?;
        let reference_date = query.reference_date.unwrap_or_else(|| self.clock.today());

        let members = self.members.list_by_tenant(&tenant_id).await?;
        let payments = self.payments.list_paid_between(&tenant_id, &window).await?;

        Ok(calendar_days(&members, &payments, reference_date, &window))
    }
}
