//! Rule tables for Japanese sales letters.
//!
//! Labels double as the text shown in reasons and suggestions, so they are
//! written for the person (or model) revising the draft.

use lazy_static::lazy_static;
use regex::Regex;

use crate::rules::{Rule, RuleGroup};

lazy_static! {
    // ---------------------------------------------------------------------
    // Validation
    // ---------------------------------------------------------------------

    /// Literal phrases no sendable letter may contain.
    pub static ref FORBIDDEN_PHRASES: Vec<Rule> = vec![
        // Placeholder markers
        Rule::literal("〇〇", "伏せ字「〇〇」", 0),
        Rule::literal("○○", "伏せ字「○○」", 0),
        Rule::literal("●●", "伏せ字「●●」", 0),
        Rule::literal("XX", "伏せ字「XX」", 0),
        Rule::literal("[会社名]", "差し込み記号「[会社名]」", 0),
        Rule::literal("【会社名】", "差し込み記号「【会社名】」", 0),
        Rule::literal("{{", "テンプレート記号「{{」", 0),
        // Low-value operational phrasing
        Rule::literal("取り急ぎ", "事務連絡調の「取り急ぎ」", 0),
        Rule::literal("とりあえず", "軽い表現「とりあえず」", 0),
        Rule::literal("ご査収", "事務連絡調の「ご査収」", 0),
        // Ceremonial flattery
        Rule::literal("ご清栄", "儀礼的な「ご清栄」", 0),
        Rule::literal("ご盛栄", "儀礼的な「ご盛栄」", 0),
        Rule::literal("お慶び申し上げます", "儀礼的な「お慶び申し上げます」", 0),
        // Vague superlatives
        Rule::literal("業界No.1", "根拠のない「業界No.1」", 0),
        Rule::literal("業界ナンバーワン", "根拠のない「業界ナンバーワン」", 0),
        Rule::literal("唯一無二", "誇張表現「唯一無二」", 0),
        Rule::literal("最高品質", "誇張表現「最高品質」", 0),
    ];

    /// Filler templates and unsupported superlatives.
    pub static ref FORBIDDEN_PATTERNS: Vec<Rule> = vec![
        Rule::pattern(
            r"(目まぐるしく|急速に|めまぐるしく|大きく)(変化|変わ)(する|り続ける|る)(時代|昨今|現代|環境)",
            "「変化の激しい時代」型の前置き",
            0,
        ),
        Rule::pattern(r"激動の(時代|昨今)|VUCAの時代", "「激動の時代」型の前置き", 0),
        Rule::pattern(
            r"(必ず|確実に|絶対に)(成果|効果|売上|結果)",
            "成果を保証する表現",
            0,
        ),
        Rule::pattern(r"どこよりも|他社には(真似|まね)できない", "根拠のない最上級表現", 0),
    ];

    /// Bracketed "needs confirmation" marker left for the user to fill in.
    pub static ref CONFIRMATION_MARKER: Regex =
        Regex::new(r"[【\[［]要確認[^】\]］]*[】\]］]").unwrap();

    /// Hedging and diagnostic vocabulary barred from complete letters.
    pub static ref COMPLETE_FORBIDDEN_VOCAB: Vec<Rule> = vec![
        Rule::literal("かもしれません", "曖昧な推量「かもしれません」", 0),
        Rule::literal("と思われます", "曖昧な推量「と思われます」", 0),
        Rule::literal("おそらく", "曖昧な推量「おそらく」", 0),
        Rule::literal("たぶん", "曖昧な推量「たぶん」", 0),
        Rule::pattern(r"お困りの(はず|こと)でしょう", "相手の状況を決めつける表現", 0),
        Rule::pattern(r"課題を抱えて(いらっしゃ|おられ)るはず", "相手の課題を決めつける表現", 0),
    ];

    /// Source-citation leakage and hedges barred from consulting letters.
    pub static ref CONSULTING_FORBIDDEN_VOCAB: Vec<Rule> = vec![
        Rule::pattern(r"出典[:：]|[（(]出典", "本文中の出典表記", 0),
        Rule::pattern(r"参照[:：]|参考URL", "本文中の参照表記", 0),
        Rule::pattern(r"https?://", "本文中のURL", 0),
        Rule::literal("かもしれません", "曖昧な推量「かもしれません」", 0),
        Rule::literal("おそらく", "曖昧な推量「おそらく」", 0),
        Rule::literal("と思われます", "曖昧な推量「と思われます」", 0),
    ];

    /// A figure with a unit, which needs a proof point behind it.
    pub static ref NUMERIC_CLAIM: Regex = Regex::new(
        r"[0-9０-９][0-9０-９,，.．]*\s*(%|％|万|億|件|社|名|時間|日|週|か月|ヶ月|カ月|月|年)"
    )
    .unwrap();

    /// Claims that the recipient recently announced something.
    pub static ref NEWS_ASSERTIONS: Vec<Rule> = vec![
        Rule::pattern(r"(を|について)(発表|公表)(され|し)", "発表への言及", 0),
        Rule::pattern(r"報道(され|によると|によれば)", "報道への言及", 0),
        Rule::pattern(r"プレスリリース|ニュースリリース", "リリースへの言及", 0),
    ];

    /// Sentences cut off at a noun stem, copy-style.
    pub static ref TELEGRAPHIC_ENDING: Regex = Regex::new(
        r"(実現|強化|推進|対応|向上|提供|削減|支援|貢献|予定|完了|構築|導入|改善|拡大|開始)。"
    )
    .unwrap();

    // ---------------------------------------------------------------------
    // Standard scoring
    // ---------------------------------------------------------------------

    /// Any figure at all.
    pub static ref NUMERIC_TOKEN: Regex =
        Regex::new(r"[0-9０-９]+(?:[,，.．][0-9０-９]+)*").unwrap();

    /// Proper-noun shaped content: katakana names, Latin names, quoted names.
    pub static ref PROPER_NOUN: Regex =
        Regex::new(r"[ァ-ヶー]{3,}|[A-Z][A-Za-z0-9]+|「[^」]{2,}」").unwrap();

    /// Phrasing that shows the sender looked at the recipient's situation.
    pub static ref EMPATHY_PATTERNS: Vec<Rule> = vec![
        Rule::literal("拝見し", "拝見", 0),
        Rule::literal("お取り組み", "お取り組み", 0),
        Rule::pattern(r"注力(され|なさ)", "注力されている点", 0),
        Rule::pattern(r"進めて(いらっしゃ|おられ)", "進めていらっしゃる点", 0),
        Rule::literal("ご尽力", "ご尽力", 0),
        Rule::pattern(r"と伺(い|っ)", "伺った内容", 0),
        Rule::literal("皆様", "現場の皆様", 0),
        Rule::literal("ご多忙", "ご多忙への配慮", 0),
    ];

    /// Concrete next-step requests.
    pub static ref CTA_PATTERNS: Vec<Rule> = vec![
        Rule::literal("お時間をいただけ", "面談の依頼", 0),
        Rule::literal("ご面談", "面談の依頼", 0),
        Rule::literal("ご都合", "日程の確認", 0),
        Rule::literal("お打ち合わせ", "打ち合わせの依頼", 0),
        Rule::literal("ご返信", "返信の依頼", 0),
        Rule::literal("お話しさせて", "説明の依頼", 0),
    ];

    /// The five rhetorical elements of a complete letter. Here `penalty`
    /// holds the points an element is worth when present.
    pub static ref STRUCTURE_ELEMENTS: Vec<Rule> = vec![
        Rule::pattern(r"このたび|先日|拝見|を受け|にあたり|を機に", "背景・きっかけ", 4),
        Rule::pattern(r"課題|負担|悩み|不足|難し|手間", "課題", 4),
        Rule::pattern(r"ご提案|ご支援|解決|仕組み|サービス", "解決策", 4),
        Rule::pattern(r"実績|事例|導入企業|ご導入", "根拠・実績", 4),
        Rule::pattern(r"お時間|ご面談|ご案内|資料|お打ち合わせ", "具体的なオファー", 4),
    ];

    /// Expressions that cost points on the NG axis.
    pub static ref NG_EXPRESSIONS: Vec<Rule> = vec![
        // Ceremonial
        Rule::literal("ご清栄", "儀礼的な定型句", 4),
        Rule::literal("ご盛栄", "儀礼的な定型句", 4),
        Rule::literal("お慶び申し上げます", "儀礼的な定型句", 4),
        Rule::literal("ご発展をお祈り", "儀礼的な定型句", 4),
        // Overassertion
        Rule::pattern(r"(必ず|確実に|絶対に)", "断定しすぎる表現", 4),
        Rule::literal("間違いなく", "断定しすぎる表現", 4),
        // Operational register
        Rule::literal("取り急ぎ", "事務連絡調の表現", 3),
        Rule::literal("ご査収", "事務連絡調の表現", 3),
        Rule::literal("念のため", "事務連絡調の表現", 3),
        // Telegraphic
        Rule::pattern(
            r"(実現|強化|推進|対応|向上|提供|削減|支援|貢献|予定|完了|構築|導入|改善|拡大|開始)。",
            "体言止めの文",
            3,
        ),
        // Unfounded diagnosis
        Rule::pattern(r"貴社の課題は|御社の課題は", "根拠のない課題の断定", 4),
        Rule::pattern(r"に違いありません|は明らかです", "根拠のない断定", 4),
        // Redundant salutation
        Rule::literal("拝啓", "不要な頭語", 3),
        Rule::literal("敬具", "不要な結語", 3),
        Rule::literal("突然のご連絡失礼いたします", "重複する挨拶", 3),
    ];

    /// Stock sales phrases that need the user's own justification.
    pub static ref TEMPLATE_PHRASES: Vec<Rule> = vec![
        Rule::literal("業務効率化", "業務効率化", 0),
        Rule::literal("DX推進", "DX推進", 0),
        Rule::literal("生産性向上", "生産性向上", 0),
        Rule::literal("コスト削減", "コスト削減", 0),
        Rule::literal("売上アップ", "売上アップ", 0),
        Rule::literal("お役に立てる", "お役に立てる", 0),
    ];

    /// Citation markers that leaked from the prompt into the body.
    pub static ref CITATION_LEAK: Regex = Regex::new(
        r"\[\d{1,2}\]|［\d{1,2}］|【出典[^】]*】|[（(]出典[:：]?[^）)]*[）)]|出典[:：]|\[source[^\]]*\]"
    )
    .unwrap();

    // ---------------------------------------------------------------------
    // Structural analysis
    // ---------------------------------------------------------------------

    /// Connectives that tie the opening fact to the letter's topic.
    pub static ref BRIDGE_PHRASES: Vec<Rule> = vec![
        Rule::literal("その中で", "その中で", 0),
        Rule::literal("そうした中", "そうした中", 0),
        Rule::literal("こうした", "こうした", 0),
        Rule::literal("それに伴い", "それに伴い", 0),
        Rule::literal("だからこそ", "だからこそ", 0),
        Rule::literal("を踏まえ", "を踏まえ", 0),
        Rule::literal("に関連して", "に関連して", 0),
    ];

    /// Tentative claims that close the opening with a hypothesis.
    pub static ref HYPOTHESIS_MARKERS: Vec<Rule> = vec![
        Rule::literal("ではないでしょうか", "ではないでしょうか", 0),
        Rule::literal("のではと", "のではと", 0),
        Rule::literal("かと存じます", "かと存じます", 0),
        Rule::literal("と推察", "と推察", 0),
        Rule::literal("とお見受け", "とお見受け", 0),
    ];

    /// Opening references to something the recipient did or published,
    /// used as the hook when no facts were supplied.
    pub static ref HOOK_CUES: Vec<Rule> = vec![
        Rule::literal("拝見しました", "拝見しました", 0),
        Rule::literal("拝読しました", "拝読しました", 0),
        Rule::pattern(r"と伺(いました|っております)", "伺いました", 0),
    ];

    /// Generic meeting lengths in minutes, matched against half-width digits.
    pub static ref CTA_MINUTES: Regex = Regex::new(r"^(10|15|20|30)$").unwrap();

    /// Decisive diagnosis templates.
    pub static ref DECISIVE_DIAGNOSES: Vec<Rule> = vec![
        Rule::pattern(r"貴社の課題は|御社の課題は", "課題の断定", 8),
        Rule::pattern(r"に違いありません", "推測の断定", 8),
        Rule::pattern(r"間違いなく", "根拠のない断定", 8),
        Rule::pattern(r"は明らかです", "根拠のない断定", 8),
    ];

    // ---------------------------------------------------------------------
    // Event scoring
    // ---------------------------------------------------------------------

    /// Calls to action that compete in an event invitation.
    pub static ref EVENT_CTAS: Vec<Rule> = vec![
        Rule::pattern(r"ブース(に|へ)(お立ち寄り|お越し)", "ブースへの来訪", 0),
        Rule::literal("個別面談", "個別面談", 0),
        Rule::literal("オンライン面談", "オンライン面談", 0),
        Rule::literal("資料請求", "資料請求", 0),
        Rule::literal("セミナーへのお申し込み", "セミナー申し込み", 0),
    ];

    pub static ref EVENT_PENALTIES: Vec<RuleGroup> = vec![
        RuleGroup::new(
            "unconfirmedSpeaker",
            20,
            vec![
                Rule::pattern(r"(登壇者|講演者|登壇)[^。]{0,6}(未定|未確定|調整中)", "登壇者が未確定", 10),
                Rule::pattern(r"[【\[]要確認[:：]?(登壇|講演)", "登壇情報が要確認", 10),
            ],
        ),
        RuleGroup::new(
            "coldGreeting",
            20,
            vec![
                Rule::literal("いつもお世話になっております", "初対面に不適切な挨拶", 10),
                Rule::literal("先日はありがとうございました", "初対面に不適切な挨拶", 10),
                Rule::literal("平素より", "初対面に不適切な挨拶", 10),
            ],
        ),
        RuleGroup::new(
            "ngExpressions",
            20,
            vec![
                Rule::literal("ご清栄", "儀礼的な定型句", 5),
                Rule::literal("取り急ぎ", "事務連絡調の表現", 5),
                Rule::pattern(r"(必ず|確実に|絶対に)", "断定しすぎる表現", 5),
                Rule::literal("〇〇", "伏せ字", 5),
            ],
        ),
    ];

    /// Phrases that contradict an exhibitor position.
    pub static ref EXHIBITOR_CONTRADICTIONS: Vec<Rule> = vec![
        Rule::pattern(r"(弊社|当社|私ども)も?(来場|見学)", "出展側なのに来場者として書いている", 20),
        Rule::pattern(r"貴社(の)?ブース", "出展側なのに相手のブースを訪ねている", 20),
    ];

    /// Phrases that contradict a visitor position.
    pub static ref VISITOR_CONTRADICTIONS: Vec<Rule> = vec![
        Rule::pattern(r"(弊社|当社)(の)?ブース", "来場側なのに自社ブースに招いている", 20),
        Rule::literal("出展いたします", "来場側なのに出展者として書いている", 20),
    ];

    // ---------------------------------------------------------------------
    // Consulting scoring
    // ---------------------------------------------------------------------

    pub static ref CONSULTING_PENALTIES: Vec<RuleGroup> = vec![
        RuleGroup::new(
            "citationLeak",
            30,
            vec![
                Rule::pattern(r"出典[:：]|[（(]出典|【出典", "本文中の出典表記", 15),
                Rule::pattern(r"\[\d{1,2}\]|［\d{1,2}］", "本文中の参照番号", 15),
                Rule::pattern(r"https?://", "本文中のURL", 15),
            ],
        ),
        RuleGroup::new(
            "hedging",
            15,
            vec![
                Rule::literal("かもしれません", "曖昧な推量", 5),
                Rule::literal("と思われます", "曖昧な推量", 5),
                Rule::literal("おそらく", "曖昧な推量", 5),
                Rule::literal("可能性があります", "曖昧な推量", 5),
            ],
        ),
        RuleGroup::new(
            "diagnosis",
            20,
            vec![
                Rule::pattern(r"貴社の課題は|御社の課題は", "課題の断定", 10),
                Rule::pattern(r"に違いありません|は明らかです|間違いなく", "根拠のない断定", 10),
            ],
        ),
        RuleGroup::new(
            "placeholder",
            20,
            vec![Rule::pattern(r"[【\[［]要確認[^】\]］]*[】\]］]|〇〇|○○", "未確定のまま残った記号", 20)],
        ),
        RuleGroup::new(
            "templatePhrases",
            15,
            vec![
                Rule::literal("業務効率化", "定型的な訴求", 5),
                Rule::literal("DX推進", "定型的な訴求", 5),
                Rule::literal("生産性向上", "定型的な訴求", 5),
                Rule::literal("コスト削減", "定型的な訴求", 5),
            ],
        ),
    ];
}
