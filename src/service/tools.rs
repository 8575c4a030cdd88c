//! Tool registry and argument-validated dispatch

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use utoipa::ToSchema;

use crate::model::StatementRequest;
use crate::model::tools::{
    KeywordArgs, SearchCourtCasesArgs, SearchHarassmentCasesArgs, SearchLawArgs, SituationArgs,
};
use crate::service::research::LegalResearchService;

#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid arguments for {tool}: {source}")]
    InvalidArguments {
        tool: ToolName,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolName {
    SearchHarassmentCases,
    SearchLaborInsuranceDecisions,
    SearchCourtCases,
    GetPsychologicalLoadCriteria,
    SearchLaw,
    SearchLaborStandardCases,
    GenerateRousaiStatement,
}

/// Behavior hints advertised with each tool
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ToolHints {
    pub read_only: bool,
    pub destructive: bool,
    pub idempotent: bool,
    pub open_world: bool,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ToolDescriptor {
    pub name: String,
    pub title: String,
    pub description: String,
    /// JSON Schema of the argument object
    #[schema(value_type = Object)]
    pub input_schema: serde_json::Value,
    pub hints: ToolHints,
}

/// One string-valued tool argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolArgument {
    pub name: &'static str,
    pub description: &'static str,
    pub required: bool,
}

const fn required(name: &'static str, description: &'static str) -> ToolArgument {
    ToolArgument {
        name,
        description,
        required: true,
    }
}

const fn optional(name: &'static str, description: &'static str) -> ToolArgument {
    ToolArgument {
        name,
        description,
        required: false,
    }
}

const HARASSMENT_CASE_ARGS: &[ToolArgument] = &[
    required("category", "検索カテゴリ（例: 精神的攻撃、パワハラ、叱責）"),
    optional("keyword", "追加キーワード（任意）"),
];

const INSURANCE_DECISION_ARGS: &[ToolArgument] =
    &[required("keyword", "検索キーワード（例: 精神障害、適応障害、パワハラ）")];

const COURT_CASE_ARGS: &[ToolArgument] = &[
    required("keyword", "検索キーワード"),
    optional("case_type", "事件類型（労働、行政、民事など）"),
];

const SITUATION_ARGS: &[ToolArgument] = &[required("situation", "評価したい状況・出来事の説明")];

const LAW_ARGS: &[ToolArgument] = &[required("law_name", "法令名または検索キーワード")];

const LABOR_STANDARD_ARGS: &[ToolArgument] = &[required("keyword", "検索キーワード")];

const STATEMENT_ARGS: &[ToolArgument] = &[
    required("incident_date", "出来事の日付"),
    required("location", "場所"),
    required("perpetrator", "行為者（役職・関係）"),
    required("behavior", "行為の内容（詳細に）"),
    required("witnesses", "目撃者情報"),
    required("diagnosis", "診断名"),
    optional("company_response", "会社の対応（任意）"),
];

impl ToolName {
    pub const ALL: [ToolName; 7] = [
        ToolName::SearchHarassmentCases,
        ToolName::SearchLaborInsuranceDecisions,
        ToolName::SearchCourtCases,
        ToolName::GetPsychologicalLoadCriteria,
        ToolName::SearchLaw,
        ToolName::SearchLaborStandardCases,
        ToolName::GenerateRousaiStatement,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ToolName::SearchHarassmentCases => "search_harassment_cases",
            ToolName::SearchLaborInsuranceDecisions => "search_labor_insurance_decisions",
            ToolName::SearchCourtCases => "search_court_cases",
            ToolName::GetPsychologicalLoadCriteria => "get_psychological_load_criteria",
            ToolName::SearchLaw => "search_law",
            ToolName::SearchLaborStandardCases => "search_labor_standard_cases",
            ToolName::GenerateRousaiStatement => "generate_rousai_statement",
        }
    }

    /// Arguments in declaration order
    pub fn arguments(&self) -> &'static [ToolArgument] {
        match self {
            ToolName::SearchHarassmentCases => HARASSMENT_CASE_ARGS,
            ToolName::SearchLaborInsuranceDecisions => INSURANCE_DECISION_ARGS,
            ToolName::SearchCourtCases => COURT_CASE_ARGS,
            ToolName::GetPsychologicalLoadCriteria => SITUATION_ARGS,
            ToolName::SearchLaw => LAW_ARGS,
            ToolName::SearchLaborStandardCases => LABOR_STANDARD_ARGS,
            ToolName::GenerateRousaiStatement => STATEMENT_ARGS,
        }
    }

    /// JSON Schema for the argument object; every argument is a string
    pub fn input_schema(&self) -> serde_json::Value {
        let properties: serde_json::Map<String, serde_json::Value> = self
            .arguments()
            .iter()
            .map(|arg| {
                (
                    arg.name.to_string(),
                    json!({ "type": "string", "description": arg.description }),
                )
            })
            .collect();
        let required: Vec<&str> = self
            .arguments()
            .iter()
            .filter(|arg| arg.required)
            .map(|arg| arg.name)
            .collect();

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    pub fn descriptor(&self) -> ToolDescriptor {
        let (title, description) = match self {
            ToolName::SearchHarassmentCases => (
                "パワハラ・ハラスメント裁判例検索",
                "厚生労働省「あかるい職場応援団」のハラスメント裁判例データベースを検索します。",
            ),
            ToolName::SearchLaborInsuranceDecisions => (
                "労働保険審査会 裁決事案検索",
                "労働保険審査会の裁決事案一覧を取得します。精神障害の業務起因性が争われた事案に特に有用です。",
            ),
            ToolName::SearchCourtCases => (
                "裁判所 判例検索",
                "裁判所公式判例検索システムから判例を検索します。労働・行政・民事事件に対応。",
            ),
            ToolName::GetPsychologicalLoadCriteria => (
                "心理的負荷評価表・精神障害労災認定基準",
                "厚労省の認定基準に基づき、特定の状況が「強」「中」「弱」のどの評価に該当するか判定します。",
            ),
            ToolName::SearchLaw => (
                "e-Gov 法令検索",
                "e-Govの法令データベースから日本の法律・政令・省令を検索します。",
            ),
            ToolName::SearchLaborStandardCases => (
                "全労連 労働基準判例検索",
                "全労連の労働基準判例データベースを検索します。",
            ),
            ToolName::GenerateRousaiStatement => (
                "労災申請書 業務上の出来事記述支援",
                "精神障害の労災申請書（様式第23号）における「業務上の出来事」の記述文を生成します。",
            ),
        };

        let local = matches!(
            self,
            ToolName::GetPsychologicalLoadCriteria | ToolName::GenerateRousaiStatement
        );

        ToolDescriptor {
            name: self.as_str().to_string(),
            title: title.to_string(),
            description: description.to_string(),
            input_schema: self.input_schema(),
            hints: ToolHints {
                read_only: !matches!(self, ToolName::GenerateRousaiStatement),
                destructive: false,
                idempotent: true,
                open_world: !local,
            },
        }
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolName {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ToolName::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ToolError::UnknownTool(s.to_string()))
    }
}

fn parse_args<T: DeserializeOwned>(tool: ToolName, args: serde_json::Value) -> Result<T, ToolError> {
    serde_json::from_value(args).map_err(|source| ToolError::InvalidArguments { tool, source })
}

impl LegalResearchService {
    /// Validate `args` against the tool's argument record and run it
    pub async fn call(&self, tool: ToolName, args: serde_json::Value) -> Result<String, ToolError> {
        tracing::debug!(tool = %tool, "Calling tool");

        let text = match tool {
            ToolName::SearchHarassmentCases => {
                let args: SearchHarassmentCasesArgs = parse_args(tool, args)?;
                self.search_harassment_cases(&args.category, args.keyword.as_deref())
                    .await
            }
            ToolName::SearchLaborInsuranceDecisions => {
                let args: KeywordArgs = parse_args(tool, args)?;
                self.search_labor_insurance_decisions(&args.keyword)
            }
            ToolName::SearchCourtCases => {
                let args: SearchCourtCasesArgs = parse_args(tool, args)?;
                self.search_court_cases(&args.keyword, args.case_type.as_deref())
            }
            ToolName::GetPsychologicalLoadCriteria => {
                let args: SituationArgs = parse_args(tool, args)?;
                self.psychological_load_criteria(&args.situation)
            }
            ToolName::SearchLaw => {
                let args: SearchLawArgs = parse_args(tool, args)?;
                self.search_law(&args.law_name)
            }
            ToolName::SearchLaborStandardCases => {
                let args: KeywordArgs = parse_args(tool, args)?;
                self.search_labor_standard_cases(&args.keyword)
            }
            ToolName::GenerateRousaiStatement => {
                let args: StatementRequest = parse_args(tool, args)?;
                self.generate_statement(&args)
            }
        };

        Ok(text)
    }
}
