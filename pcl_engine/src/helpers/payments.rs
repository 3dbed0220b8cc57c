use chrono::{DateTime, Datelike, NaiveDate, Utc};
use pcl_common::Paise;
use serde::{Deserialize, Serialize};

use crate::db_types::{AmountBreakdown, BookingType, NewBooking, PayoutCredit, UserId, UserRole};

/// The league withholds 10% of every fee category.
pub const COMMISSION_RATE: f64 = 0.10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentBreakdown {
    pub stadium: Paise,
    pub stadium_commission: Paise,
    pub stadium_net: Paise,
    pub referee: Paise,
    pub referee_commission: Paise,
    pub referee_net: Paise,
    pub staff: Paise,
    pub staff_commission: Paise,
    pub staff_net: Paise,
    pub total: Paise,
    pub total_commission: Paise,
    pub total_payout: Paise,
}

impl PaymentBreakdown {
    pub fn amounts(&self) -> AmountBreakdown {
        AmountBreakdown {
            stadium: self.stadium,
            stadium_commission: self.stadium_commission,
            referee: self.referee,
            referee_commission: self.referee_commission,
            staff: self.staff,
            staff_commission: self.staff_commission,
        }
    }
}

/// Splits the fees (given in rupees) for a match into gross amounts, commission and payee net amounts, in paise.
pub fn calculate_payment_breakdown(stadium_fee: f64, referee_fee: f64, staff_fee: f64) -> PaymentBreakdown {
    let stadium = Paise::from_rupees(stadium_fee);
    let referee = Paise::from_rupees(referee_fee);
    let staff = Paise::from_rupees(staff_fee);
    let stadium_commission = stadium.percent(COMMISSION_RATE);
    let referee_commission = referee.percent(COMMISSION_RATE);
    let staff_commission = staff.percent(COMMISSION_RATE);
    let stadium_net = stadium - stadium_commission;
    let referee_net = referee - referee_commission;
    let staff_net = staff - staff_commission;
    PaymentBreakdown {
        stadium,
        stadium_commission,
        stadium_net,
        referee,
        referee_commission,
        referee_net,
        staff,
        staff_commission,
        staff_net,
        total: stadium + referee + staff,
        total_commission: stadium_commission + referee_commission + staff_commission,
        total_payout: stadium_net + referee_net + staff_net,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefundQuote {
    pub refund_amount: Paise,
    /// Whole percent of the payment that is refunded
    pub refund_percentage: i64,
    pub reason: String,
}

/// Applies the cancellation policy. The refund depends on how long before kick-off the match is cancelled:
///
/// | notice        | refund |
/// |---------------|--------|
/// | 24h or more   | 90%    |
/// | 12h to 24h    | 50%    |
/// | 6h to 12h     | 25%    |
/// | less than 6h  | none   |
pub fn calculate_refund_amount(amount: Paise, match_at: DateTime<Utc>, cancelled_at: DateTime<Utc>) -> RefundQuote {
    let hours = (match_at - cancelled_at).num_seconds() as f64 / 3600.0;
    let (percent, reason) = if hours >= 24.0 {
        (90, "Cancelled 24+ hours before match")
    } else if hours >= 12.0 {
        (50, "Cancelled 12-24 hours before match")
    } else if hours >= 6.0 {
        (25, "Cancelled 6-12 hours before match")
    } else {
        (0, "Cancelled less than 6 hours before match - no refund")
    };
    RefundQuote {
        refund_amount: amount.percent(percent as f64 / 100.0),
        refund_percentage: percent,
        reason: reason.to_string(),
    }
}

/// The people a match payment is paid out to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Payees {
    pub stadium_owner: Option<UserId>,
    pub referee: Option<UserId>,
    pub staff: Vec<UserId>,
}

/// Builds the bookings for a captured payment. Staff amounts and commission are shared equally, rounding down.
pub fn plan_bookings(breakdown: &AmountBreakdown, payees: &Payees) -> Vec<NewBooking> {
    let mut bookings = Vec::new();
    if let Some(owner) = payees.stadium_owner.as_ref().filter(|_| breakdown.stadium.is_positive()) {
        bookings.push(NewBooking {
            booking_type: BookingType::Stadium,
            resource_id: owner.clone(),
            amount: breakdown.stadium,
            commission: breakdown.stadium_commission,
        });
    }
    if let Some(referee) = payees.referee.as_ref().filter(|_| breakdown.referee.is_positive()) {
        bookings.push(NewBooking {
            booking_type: BookingType::Referee,
            resource_id: referee.clone(),
            amount: breakdown.referee,
            commission: breakdown.referee_commission,
        });
    }
    if breakdown.staff.is_positive() && !payees.staff.is_empty() {
        let count = payees.staff.len();
        let amount = breakdown.staff.split_floor(count);
        let commission = breakdown.staff_commission.split_floor(count);
        bookings.extend(payees.staff.iter().map(|id| NewBooking {
            booking_type: BookingType::Staff,
            resource_id: id.clone(),
            amount,
            commission,
        }));
    }
    bookings
}

/// The net amounts credited to each payee's pending payout summary. Staff share the net staff amount equally,
/// rounded to the nearest paisa.
pub fn plan_payout_credits(breakdown: &AmountBreakdown, payees: &Payees) -> Vec<PayoutCredit> {
    let mut credits = Vec::new();
    if let Some(owner) = &payees.stadium_owner {
        let amount = breakdown.stadium - breakdown.stadium_commission;
        if amount.is_positive() {
            credits.push(PayoutCredit { user_id: owner.clone(), role: UserRole::StadiumOwner, amount });
        }
    }
    if let Some(referee) = &payees.referee {
        let amount = breakdown.referee - breakdown.referee_commission;
        if amount.is_positive() {
            credits.push(PayoutCredit { user_id: referee.clone(), role: UserRole::Referee, amount });
        }
    }
    let staff_net = breakdown.staff - breakdown.staff_commission;
    if staff_net.is_positive() && !payees.staff.is_empty() {
        let amount = staff_net.split_round(payees.staff.len());
        let role = UserRole::Staff;
        credits.extend(payees.staff.iter().map(|id| PayoutCredit { user_id: id.clone(), role, amount }));
    }
    credits
}

/// The first and last day of the calendar month containing `at`.
pub fn payout_period(at: DateTime<Utc>) -> (NaiveDate, NaiveDate) {
    let today = at.date_naive();
    let start = today.with_day(1).unwrap_or(today);
    let next_month = if start.month() == 12 {
        NaiveDate::from_ymd_opt(start.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(start.year(), start.month() + 1, 1)
    };
    let end = next_month.and_then(|d| d.pred_opt()).unwrap_or(today);
    (start, end)
}
