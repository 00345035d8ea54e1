//! Prompt for per-page fact extraction.

/// Marker the extractor puts in front of multi-year strategy items.
pub const LONG_RANGE_MARKER: &str = "【中長期】";

/// Prompt for extracting short factual claims from one page.
pub const FACT_PROMPT: &str = r#"以下の企業Webページから、営業レターの根拠として使える事実だけを抽出してください。

ルール:
1. ページに書かれている内容だけを使う。推測や一般論は書かない
2. 各項目は60文字以内の短い文にする
3. numbers: 数値と単位を含む事実(売上高、従業員数、拠点数、成長率など)
4. properNouns: 製品名、サービス名、拠点名、提携先などの固有名詞
5. recentMoves: 最近の動き。日付(年月または年月日)が明記されていない項目は含めない
6. hiringTrends: 採用人数、募集職種、採用方針
7. companyDirection: 方針や戦略。中期経営計画など複数年にわたる計画は先頭に「{marker}」を付ける
8. 該当がないカテゴリは空配列にする

出力JSON:
{
    "numbers": ["..."],
    "properNouns": ["..."],
    "recentMoves": ["..."],
    "hiringTrends": ["..."],
    "companyDirection": ["..."]
}

ページURL: {url}
ページ本文:
{content}"#;

/// Render the fact extraction prompt for one page.
pub fn format_fact_prompt(page_url: &str, page_text: &str) -> String {
    FACT_PROMPT
        .replace("{marker}", LONG_RANGE_MARKER)
        .replace("{url}", page_url)
        .replace("{content}", page_text)
}
