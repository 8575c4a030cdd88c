//! 様式第23号「業務上の出来事」statement drafting

use crate::model::StatementRequest;

/// Used when the company response is absent or empty
pub const DEFAULT_COMPANY_RESPONSE: &str = "会社からの謝罪・再発防止措置は一切ありませんでした。";

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Rubric citation included in every statement.
///
/// This is not derived from the classifier: a statement always claims the Strong
/// tier, whatever the narrative says. Reviewers of a draft should check it.
pub const SEVERITY_BOILERPLATE: &str = "本件は、厚労省「業務による心理的負荷評価表」⑤パワーハラスメントの類型における
「必要以上に長時間にわたる厳しい叱責、他の労働者の面前における大声での威圧的な叱責
など、態様や手段が社会通念に照らして許容される範囲を超える精神的攻撃」に該当します。
心理的負荷の強度は「強」と評価されるべき事案です。";

pub const DISCLAIMER: &str =
    "【注意】この文章はAI支援案です。主治医・社労士・弁護士に確認の上ご使用ください。";

/// Render the statement draft. Pure substitution into a fixed layout.
pub fn compose(req: &StatementRequest) -> String {
    let company_response = req
        .company_response
        .as_deref()
        .filter(|r| !r.is_empty())
        .unwrap_or(DEFAULT_COMPANY_RESPONSE);

    format!(
        "{rule}
【様式第23号 業務上の出来事の記述（案）】
{rule}

■ 発生日時・場所
{date}、{location}において

■ 業務上の出来事
{perpetrator}より、以下の行為を受けました。

{behavior}

目撃者: {witnesses}

■ 心理的負荷の評価根拠
{boilerplate}

■ 発症との因果関係
上記出来事の直後より症状が生じ、「{diagnosis}」の診断を受けました。

■ 会社の対応
{company_response}

{rule}
{disclaimer}
{rule}",
        rule = RULE,
        date = req.incident_date,
        location = req.location,
        perpetrator = req.perpetrator,
        behavior = req.behavior,
        witnesses = req.witnesses,
        boilerplate = SEVERITY_BOILERPLATE,
        diagnosis = req.diagnosis,
        company_response = company_response,
        disclaimer = DISCLAIMER,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(company_response: Option<&str>) -> StatementRequest {
        StatementRequest {
            incident_date: "2024-01-10".to_string(),
            location: "本社会議室".to_string(),
            perpetrator: "直属の課長".to_string(),
            behavior: "軽い注意を受けた".to_string(),
            witnesses: "同僚2名".to_string(),
            diagnosis: "適応障害".to_string(),
            company_response: company_response.map(str::to_string),
        }
    }

    #[test]
    fn test_missing_company_response_uses_placeholder() {
        let text = compose(&request(None));

        assert!(text.contains("■ 会社の対応\n会社からの謝罪・再発防止措置は一切ありませんでした。\n"));
        assert!(text.contains("2024-01-10、本社会議室において"));
    }

    #[test]
    fn test_empty_company_response_uses_placeholder() {
        let text = compose(&request(Some("")));
        assert!(text.contains(DEFAULT_COMPANY_RESPONSE));
    }

    #[test]
    fn test_supplied_company_response_is_used() {
        let text = compose(&request(Some("人事部が聞き取りを行ったのみでした。")));

        assert!(text.contains("■ 会社の対応\n人事部が聞き取りを行ったのみでした。"));
        assert!(!text.contains(DEFAULT_COMPANY_RESPONSE));
    }

    #[test]
    fn test_sections_in_order() {
        let text = compose(&request(None));

        let markers = [
            "【様式第23号 業務上の出来事の記述（案）】",
            "■ 発生日時・場所",
            "■ 業務上の出来事",
            "直属の課長より、以下の行為を受けました。",
            "目撃者: 同僚2名",
            "■ 心理的負荷の評価根拠",
            "■ 発症との因果関係",
            "「適応障害」の診断を受けました。",
            "■ 会社の対応",
            DISCLAIMER,
        ];
        let positions: Vec<usize> = markers
            .iter()
            .map(|m| text.find(m).unwrap_or_else(|| panic!("missing {}", m)))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(text.starts_with(RULE));
        assert!(text.ends_with(RULE));
    }

    #[test]
    fn test_strong_boilerplate_is_unconditional() {
        // Narrative carries no strong indicator, the boilerplate still claims 「強」
        let text = compose(&request(None));
        assert!(text.contains(SEVERITY_BOILERPLATE));
        assert!(text.contains("「強」と評価されるべき事案です。"));
    }
}
