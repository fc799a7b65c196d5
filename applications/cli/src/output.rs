//! Plain-text rendering of API records for the terminal.

use helpernote_core::currency::format_currency;
use helpernote_core::phone::format_phone_number;
use helpernote_core::{
    Customer, JobPosting, JobSeekingPosting, Matching, Result, SettlementItem, SettlementSummary,
    Tag,
};

pub fn customer_line(customer: &Customer) -> String {
    format!(
        "#{:<5} {:<10} {:<14} {}",
        customer.id,
        customer.name,
        format_phone_number(&customer.phone),
        customer.customer_type.label()
    )
}

pub fn customer_detail(customer: &Customer, tags: &[Tag]) -> String {
    let mut lines = vec![
        format!("고객 #{}", customer.id),
        format!("  이름:     {}", customer.name),
        format!("  연락처:   {}", format_phone_number(&customer.phone)),
        format!("  유형:     {}", customer.customer_type.label()),
    ];
    if let Some(birth_date) = customer.birth_date {
        lines.push(format!("  생년월일: {}", birth_date));
    }
    if let Some(address) = &customer.address {
        lines.push(format!("  주소:     {}", address));
    }
    if !tags.is_empty() {
        let names: Vec<&str> = tags.iter().map(|t| t.tag_name.as_str()).collect();
        lines.push(format!("  태그:     {}", names.join(", ")));
    }
    lines.join("\n")
}

pub fn job_posting_line(posting: &JobPosting) -> Result<String> {
    Ok(format!(
        "#{:<5} 고객 #{:<5} {:>14}  수수료 {:>12}  {} / {}",
        posting.id,
        posting.customer_id,
        format_currency(posting.salary),
        format_currency(posting.calculated_fee()?),
        posting.posting_status.label(),
        posting.settlement_status.label()
    ))
}

pub fn job_seeking_line(posting: &JobSeekingPosting) -> Result<String> {
    Ok(format!(
        "#{:<5} 고객 #{:<5} {:>14}  수수료 {:>12}  {} / {} ({})",
        posting.id,
        posting.customer_id,
        format_currency(posting.desired_salary),
        format_currency(posting.calculated_fee()?),
        posting.posting_status.label(),
        posting.settlement_status.label(),
        posting.preferred_location
    ))
}

pub fn matching_line(matching: &Matching) -> Result<String> {
    let fees = matching.fees()?;
    Ok(format!(
        "#{:<5} 구인 #{} ↔ 구직 #{}  {:>14}  수수료 {:>12}  {}",
        matching.id,
        matching.job_posting_id,
        matching.job_seeking_posting_id,
        format_currency(matching.agreed_salary),
        format_currency(fees.total()),
        matching.matching_status.label()
    ))
}

pub fn matching_detail(matching: &Matching) -> Result<String> {
    let fees = matching.fees()?;
    let mut lines = vec![
        format!("매칭 #{} ({})", matching.id, matching.matching_status.label()),
        format!("  구인공고:   #{}", matching.job_posting_id),
        format!("  구직공고:   #{}", matching.job_seeking_posting_id),
        format!("  합의 급여:  {}", format_currency(matching.agreed_salary)),
        format!(
            "  고용주 수수료: {} ({}%)",
            format_currency(fees.employer_fee),
            matching.employer_fee_rate.normalize()
        ),
        format!(
            "  근로자 수수료: {} ({}%)",
            format_currency(fees.employee_fee),
            matching.employee_fee_rate.normalize()
        ),
        format!("  합계:       {}", format_currency(fees.total())),
        format!("  매칭일:     {}", matching.matched_at.format("%Y-%m-%d %H:%M")),
    ];
    if let Some(reason) = &matching.cancellation_reason {
        lines.push(format!("  취소 사유:  {}", reason));
    }
    Ok(lines.join("\n"))
}

pub fn settlement_line(item: &SettlementItem) -> String {
    format!(
        "{} #{:<5} {:<10} {:>12}  {}",
        item.posting_type.label(),
        item.id,
        item.customer_name,
        format_currency(item.effective_amount()),
        item.settlement_status.label()
    )
}

pub fn settlement_summary(summary: &SettlementSummary) -> String {
    [
        format!(
            "미정산: {}건  {}",
            summary.total_unsettled,
            format_currency(summary.total_unsettled_amount)
        ),
        format!(
            "정산완료: {}건  {}",
            summary.total_settled,
            format_currency(summary.total_settled_amount)
        ),
    ]
    .join("\n")
}

pub fn tag_line(tag: &Tag) -> String {
    match &tag.description {
        Some(description) => format!("#{:<5} {} {}  {}", tag.id, tag.tag_color, tag.tag_name, description),
        None => format!("#{:<5} {} {}", tag.id, tag.tag_color, tag.tag_name),
    }
}
