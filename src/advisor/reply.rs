//! Extraction and strict parsing of the reasoning service reply

use chrono::Duration;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::types::{AnalysisResult, PaymentRecommendation};
use crate::error::ReplyError;
use crate::format::months_to_duration;

/// Expected reply shape; every field is required
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AiReply {
    overall_strategy: String,
    recommendations: Vec<AiRecommendation>,
    key_insights: Vec<String>,
    warnings: Vec<String>,
    total_interest_savings: Decimal,
    total_monthly_savings: Decimal,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AiRecommendation {
    loan_name: String,
    recommended_payment: Decimal,
    extra_payment: Decimal,
    reasoning: String,
    estimated_interest_savings: Decimal,
    estimated_months_reduced: Decimal,
}

/// First balanced `{...}` object in `text`, ignoring braces inside JSON strings
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }

    None
}

fn to_recommendation(rec: AiRecommendation) -> Result<PaymentRecommendation, ReplyError> {
    let months = rec.estimated_months_reduced.max(Decimal::ZERO);
    let time_reduction = months_to_duration(months).ok_or(ReplyError::OutOfRange {
        field: "estimatedMonthsReduced",
        value: months,
    })?;

    Ok(PaymentRecommendation {
        loan_name: rec.loan_name,
        recommended_payment: rec.recommended_payment,
        extra_payment: rec.extra_payment,
        reasoning: rec.reasoning,
        interest_savings: rec.estimated_interest_savings,
        time_reduction,
    })
}

/// Parse a raw reply into an analysis result
///
/// Prose or markdown fences around the object are tolerated; a missing or
/// mistyped field, or a month count too large to represent, fails the
/// whole reply.
pub fn parse_reply(text: &str) -> Result<AnalysisResult, ReplyError> {
    let json = extract_json_object(text).ok_or(ReplyError::NoJsonObject)?;
    let reply: AiReply = serde_json::from_str(json)?;

    let recommendations = reply
        .recommendations
        .into_iter()
        .map(to_recommendation)
        .collect::<Result<Vec<_>, _>>()?;

    let overall_time_reduction = recommendations
        .iter()
        .map(|r| r.time_reduction)
        .max()
        .unwrap_or_else(Duration::zero);

    Ok(AnalysisResult {
        recommendations,
        overall_strategy: reply.overall_strategy,
        total_monthly_savings: reply.total_monthly_savings,
        total_interest_savings: reply.total_interest_savings,
        overall_time_reduction,
        key_insights: reply.key_insights,
        warnings: reply.warnings,
        is_ai_powered: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::duration_days;
    use approx::assert_relative_eq;
    use rust_decimal_macros::dec;

    const REPLY: &str = r#"{
        "overallStrategy": "Pay the card first {it costs the most}",
        "recommendations": [
            {
                "loanName": "Card",
                "recommendedPayment": 250.00,
                "extraPayment": 150.00,
                "reasoning": "Highest rate",
                "estimatedInterestSavings": 320.5,
                "estimatedMonthsReduced": 6
            }
        ],
        "keyInsights": ["Card rate is 24%"],
        "warnings": [],
        "totalInterestSavings": 320.5,
        "totalMonthlySavings": 0
    }"#;

    #[test]
    fn test_extract_plain_object() {
        assert_eq!(extract_json_object("{\"a\":1}"), Some("{\"a\":1}"));
        assert_eq!(extract_json_object("no json here"), None);
        assert_eq!(extract_json_object("{\"a\": {\"b\": 1}"), None);
    }

    #[test]
    fn test_extract_skips_surrounding_text() {
        let text = "Sure! Here you go:\n```json\n{\"a\": {\"b\": \"}\"}}\n```\nAnything else? {\"c\": 2}";
        assert_eq!(extract_json_object(text), Some("{\"a\": {\"b\": \"}\"}}"));
    }

    #[test]
    fn test_parse_wrapped_reply() {
        let text = format!("Here is my analysis:\n```json\n{}\n```\nGood luck!", REPLY);
        let result = parse_reply(&text).unwrap();

        assert!(result.is_ai_powered);
        assert_eq!(result.overall_strategy, "Pay the card first {it costs the most}");
        assert_eq!(result.recommendations.len(), 1);
        let card = &result.recommendations[0];
        assert_eq!(card.extra_payment, dec!(150));
        assert_eq!(card.interest_savings, dec!(320.5));
        assert_relative_eq!(duration_days(card.time_reduction), 6.0 * 30.44, epsilon = 1e-6);
        assert_eq!(result.overall_time_reduction, card.time_reduction);
        assert_eq!(result.total_interest_savings, dec!(320.5));
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_missing_field_fails() {
        let text = REPLY.replace("\"totalMonthlySavings\": 0", "\"unexpected\": 0");
        assert!(matches!(parse_reply(&text), Err(ReplyError::Schema(_))));

        let text = REPLY.replace("\"estimatedMonthsReduced\": 6", "\"monthsReduced\": 6");
        assert!(matches!(parse_reply(&text), Err(ReplyError::Schema(_))));
    }

    #[test]
    fn test_negative_months_clamp_to_zero() {
        let text = REPLY.replace("\"estimatedMonthsReduced\": 6", "\"estimatedMonthsReduced\": -4");
        let result = parse_reply(&text).unwrap();
        assert_eq!(result.recommendations[0].time_reduction, Duration::zero());
        assert_eq!(result.overall_time_reduction, Duration::zero());
    }

    #[test]
    fn test_wrong_field_type_fails() {
        let text = REPLY.replace("\"recommendedPayment\": 250.00", "\"recommendedPayment\": \"lots\"");
        assert!(matches!(parse_reply(&text), Err(ReplyError::Schema(_))));

        let text = REPLY.replace("\"keyInsights\": [\"Card rate is 24%\"]", "\"keyInsights\": \"none\"");
        assert!(matches!(parse_reply(&text), Err(ReplyError::Schema(_))));
    }

    #[test]
    fn test_huge_month_count_fails() {
        let text = REPLY.replace("\"estimatedMonthsReduced\": 6", "\"estimatedMonthsReduced\": 1e25");
        assert!(matches!(
            parse_reply(&text),
            Err(ReplyError::OutOfRange { field: "estimatedMonthsReduced", .. })
        ));

        // Representable as a decimal, not as a duration
        let text = REPLY.replace("\"estimatedMonthsReduced\": 6", "\"estimatedMonthsReduced\": 50000000000");
        assert!(matches!(parse_reply(&text), Err(ReplyError::OutOfRange { .. })));
    }

    #[test]
    fn test_no_object_fails() {
        assert!(matches!(parse_reply("I cannot help with that."), Err(ReplyError::NoJsonObject)));
    }
}
