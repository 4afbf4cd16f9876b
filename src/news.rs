//! News feed, article reader and research reports. All reference data, seeded
//! once at startup; the reader resolves articles by id and a miss is a
//! terminal not-found state rather than an error.

use chrono::NaiveDate;

#[derive(Clone, Debug)]
pub struct NewsItem {
    pub id: &'static str,
    pub title: &'static str,
    pub summary: &'static str,
    pub date: NaiveDate,
    pub category: &'static str,
    pub read_time_min: u8,
    pub likes: u32,
}

#[derive(Clone, Debug)]
pub struct Article {
    pub id: &'static str,
    pub title: &'static str,
    pub author: &'static str,
    pub author_position: &'static str,
    pub date: NaiveDate,
    pub category: &'static str,
    pub tags: &'static [&'static str],
    pub body: &'static [&'static str],
    pub likes: u32,
    pub comments: u32,
    pub shares: u32,
}

#[derive(Clone, Debug)]
pub struct ResearchReport {
    pub id: &'static str,
    pub title: &'static str,
    pub summary: &'static str,
    pub author: &'static str,
    pub date: NaiveDate,
    pub category: &'static str,
    pub tags: &'static [&'static str],
    pub premium: bool,
    pub pages: u16,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NewsSort {
    Date,
    Likes,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

pub const CATEGORIES: &[&str] = &[
    "All", "Bitcoin", "Ethereum", "DeFi", "NFT", "Regulation", "Adoption", "Mining",
    "Security", "CBDC",
];

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

pub fn seed_news() -> Vec<NewsItem> {
    vec![
        NewsItem { id: "1", title: "Bitcoin ETF Approval Sends Markets into Bull Run Territory", summary: "After years of anticipation, the SEC has finally approved the first Bitcoin spot ETF, allowing institutional investors easier access to the crypto market.", date: ymd(2023, 5, 15), category: "Bitcoin", read_time_min: 5, likes: 234 },
        NewsItem { id: "2", title: "Ethereum Completes Major Upgrade, Gas Fees Drop by 90%", summary: "The long-awaited Ethereum upgrade has finally been completed, resulting in significantly lower transaction fees and improved scalability.", date: ymd(2023, 5, 12), category: "Ethereum", read_time_min: 4, likes: 187 },
        NewsItem { id: "3", title: "Central Banks Globally Consider Digital Currency Options", summary: "More than 80% of central banks worldwide are now exploring the possibility of issuing their own digital currencies, according to a new report.", date: ymd(2023, 5, 10), category: "CBDC", read_time_min: 6, likes: 142 },
        NewsItem { id: "4", title: "DeFi Protocol Achieves $1 Billion in Total Value Locked", summary: "The decentralized finance protocol has reached a significant milestone, with over $1 billion in assets now locked in its smart contracts.", date: ymd(2023, 5, 8), category: "DeFi", read_time_min: 3, likes: 98 },
        NewsItem { id: "5", title: "NFT Marketplace Launches New Creator-Focused Features", summary: "The popular NFT marketplace has announced a suite of new features designed to empower creators and provide more earning opportunities.", date: ymd(2023, 5, 5), category: "NFT", read_time_min: 5, likes: 112 },
        NewsItem { id: "6", title: "Major Payment Processor Adds Crypto Payment Options", summary: "One of the world's largest payment processors has announced it will support cryptocurrency payments, marking a major step toward mainstream adoption.", date: ymd(2023, 5, 3), category: "Adoption", read_time_min: 4, likes: 167 },
        NewsItem { id: "7", title: "Crypto Mining Farm Switches to 100% Renewable Energy", summary: "A major cryptocurrency mining operation has completed its transition to using exclusively renewable energy sources, addressing environmental concerns.", date: ymd(2023, 5, 1), category: "Mining", read_time_min: 7, likes: 203 },
        NewsItem { id: "8", title: "New Regulatory Framework for Crypto Assets Proposed", summary: "Lawmakers have introduced a comprehensive regulatory framework aimed at providing clarity for cryptocurrency businesses while protecting consumers.", date: ymd(2023, 4, 28), category: "Regulation", read_time_min: 8, likes: 145 },
        NewsItem { id: "9", title: "Cross-Chain Bridge Protocol Improves Security Measures", summary: "Following several high-profile exploits, a popular cross-chain bridge protocol has implemented enhanced security measures to protect user funds.", date: ymd(2023, 4, 25), category: "Security", read_time_min: 6, likes: 89 },
    ]
}

pub fn seed_articles() -> Vec<Article> {
    vec![
        Article {
            id: "1",
            title: "Bitcoin ETF Approval Sends Markets into Bull Run Territory",
            author: "Alex Thompson",
            author_position: "Senior Crypto Analyst",
            date: ymd(2023, 5, 15),
            category: "Bitcoin",
            tags: &["Bitcoin", "ETF", "Regulation", "Institutional Investment"],
            body: &[
                "After years of anticipation, the Securities and Exchange Commission has finally approved the first Bitcoin spot Exchange-Traded Fund, marking a significant milestone in the cryptocurrency industry's journey toward mainstream acceptance.",
                "The approval, which came after multiple rejected applications over the past five years, allows institutional investors easier access to the Bitcoin market without the need to directly hold the digital asset.",
                "Following the announcement, Bitcoin's price surged by over 15% within 24 hours, briefly touching an all-time high above $68,000. The strong price action has led many analysts to suggest that crypto markets have officially entered bull run territory.",
                "Several major financial institutions have already expressed their intention to offer Bitcoin ETF products to their clients. Industry experts predict that the ETF could attract more than $50 billion in inflows during its first year.",
                "Analysts are now looking ahead to potential Ethereum ETF approvals, which many believe could follow in the coming months. Whether this approval marks the beginning of a sustained bull market remains to be seen, but its significance for the ecosystem is undeniable.",
            ],
            likes: 234,
            comments: 56,
            shares: 89,
        },
        Article {
            id: "2",
            title: "Ethereum Completes Major Upgrade, Gas Fees Drop by 90%",
            author: "Sophia Rodriguez",
            author_position: "Blockchain Technology Reporter",
            date: ymd(2023, 5, 12),
            category: "Ethereum",
            tags: &["Ethereum", "Gas Fees", "Scalability", "DeFi", "NFT"],
            body: &[
                "The long-awaited Ethereum upgrade has finally been completed, resulting in significantly lower transaction fees and improved scalability for the world's second-largest blockchain network.",
                "After months of testing, the upgrade was implemented through a hard fork that introduced several key improvements. Most notably, average transaction costs have dropped by approximately 90% compared to previous levels.",
                "The decentralized finance and non-fungible token sectors, heavily built on Ethereum infrastructure, have already begun seeing positive effects. Daily active users across major DeFi platforms increased by over 35% in the week following the upgrade.",
                "Ethereum's price has responded positively, rising approximately 25% since the upgrade was announced, though analysts are more focused on the long-term implications for the ecosystem than short-term price movements.",
                "The development team has already outlined the next phases of the roadmap, which include further scalability improvements and enhanced privacy features.",
            ],
            likes: 187,
            comments: 43,
            shares: 65,
        },
        Article {
            id: "3",
            title: "Central Banks Globally Consider Digital Currency Options",
            author: "Marcus Webb",
            author_position: "Financial Policy Correspondent",
            date: ymd(2023, 5, 10),
            category: "CBDC",
            tags: &["CBDC", "Central Banks", "Monetary Policy"],
            body: &[
                "More than 80% of central banks worldwide are now exploring the possibility of issuing their own digital currencies, according to a new comprehensive report released this week by the Bank for International Settlements.",
                "The report, which surveyed 81 central banks across developed and emerging economies, indicates a significant acceleration in Central Bank Digital Currency research and development compared to previous years.",
                "Emerging economies are leading the charge, with several pilot programs already live. Developed economies remain more cautious, citing privacy concerns and the potential impact on commercial banking.",
                "The trend represents a fundamental shift in how monetary authorities are approaching the digital transformation of finance, with most respondents expecting a live retail CBDC within the decade.",
            ],
            likes: 142,
            comments: 31,
            shares: 47,
        },
    ]
}

pub fn seed_reports() -> Vec<ResearchReport> {
    vec![
        ResearchReport { id: "r1", title: "The Institutional Shift: Crypto Allocation in Traditional Portfolios", summary: "A quantitative look at how pension funds and asset managers are sizing digital-asset allocations.", author: "Dr. Elena Vasquez", date: ymd(2023, 5, 14), category: "Bitcoin", tags: &["Institutional", "Allocation", "Risk"], premium: true, pages: 42 },
        ResearchReport { id: "r2", title: "Layer 2 Scaling: State of the Ecosystem", summary: "Comparative throughput, cost and security analysis of the leading Ethereum rollups.", author: "James Park", date: ymd(2023, 5, 9), category: "Ethereum", tags: &["Layer 2", "Rollups", "Scalability"], premium: true, pages: 38 },
        ResearchReport { id: "r3", title: "Stablecoin Mechanics and Systemic Risk", summary: "How reserve composition and redemption design shape depeg scenarios.", author: "Priya Nair", date: ymd(2023, 5, 4), category: "Regulation", tags: &["Stablecoins", "Risk"], premium: false, pages: 27 },
        ResearchReport { id: "r4", title: "DeFi Yield Sources: Sustainable or Circular?", summary: "Decomposing where decentralized finance yields actually come from.", author: "Tom Okafor", date: ymd(2023, 4, 30), category: "DeFi", tags: &["DeFi", "Yield"], premium: false, pages: 19 },
        ResearchReport { id: "r5", title: "Mining Economics After the Halving", summary: "Hashrate, energy markets and miner margin projections for the next cycle.", author: "Dr. Elena Vasquez", date: ymd(2023, 4, 22), category: "Mining", tags: &["Mining", "Halving", "Energy"], premium: true, pages: 33 },
        ResearchReport { id: "r6", title: "NFT Market Microstructure", summary: "Liquidity, wash trading detection and price discovery in NFT marketplaces.", author: "Sarah Kim", date: ymd(2023, 4, 18), category: "NFT", tags: &["NFT", "Liquidity"], premium: false, pages: 24 },
    ]
}

/// Resolve an article id for the reader view. A miss means a not-found
/// screen, not an error.
pub fn lookup<'a>(articles: &'a [Article], id: &str) -> Option<&'a Article> {
    articles.iter().find(|a| a.id == id)
}

/// Search over title and summary, category filter, then sort by date or
/// likes in the requested order.
pub fn filter_and_sort<'a>(
    items: &'a [NewsItem],
    search: &str,
    category: &str,
    sort: NewsSort,
    order: SortOrder,
) -> Vec<&'a NewsItem> {
    let needle = search.to_lowercase();
    let mut matched: Vec<&NewsItem> = items
        .iter()
        .filter(|item| {
            let matches_search = needle.is_empty()
                || item.title.to_lowercase().contains(&needle)
                || item.summary.to_lowercase().contains(&needle);
            let matches_category = category == "All" || item.category == category;
            matches_search && matches_category
        })
        .collect();

    matched.sort_by(|a, b| {
        let ord = match sort {
            NewsSort::Date => a.date.cmp(&b.date),
            NewsSort::Likes => a.likes.cmp(&b.likes),
        };
        match order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    });
    matched
}

/// Research list filter: search spans title, summary, author and tags.
pub fn filter_reports<'a>(
    reports: &'a [ResearchReport],
    search: &str,
    category: &str,
    premium_only: bool,
) -> Vec<&'a ResearchReport> {
    let needle = search.to_lowercase();
    reports
        .iter()
        .filter(|report| {
            let matches_search = needle.is_empty()
                || report.title.to_lowercase().contains(&needle)
                || report.summary.to_lowercase().contains(&needle)
                || report.author.to_lowercase().contains(&needle)
                || report.tags.iter().any(|t| t.to_lowercase().contains(&needle));
            let matches_category = category == "All" || report.category == category;
            let matches_premium = !premium_only || report.premium;
            matches_search && matches_category && matches_premium
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_hit_and_miss() {
        let articles = seed_articles();
        assert!(lookup(&articles, "1").is_some());
        assert!(lookup(&articles, "2").is_some());
        assert!(lookup(&articles, "999").is_none(), "unknown id is a not-found, not a panic");
    }

    #[test]
    fn test_filter_by_category() {
        let items = seed_news();
        let bitcoin = filter_and_sort(&items, "", "Bitcoin", NewsSort::Date, SortOrder::Desc);
        assert_eq!(bitcoin.len(), 1);
        assert_eq!(bitcoin[0].id, "1");

        let all = filter_and_sort(&items, "", "All", NewsSort::Date, SortOrder::Desc);
        assert_eq!(all.len(), items.len());
    }

    #[test]
    fn test_filter_by_search_term() {
        let items = seed_news();
        let hits = filter_and_sort(&items, "ethereum", "All", NewsSort::Date, SortOrder::Desc);
        assert_eq!(hits.len(), 1);

        let none = filter_and_sort(&items, "quantum", "All", NewsSort::Date, SortOrder::Desc);
        assert!(none.is_empty());
    }

    #[test]
    fn test_sort_by_date_and_likes() {
        let items = seed_news();
        let by_date = filter_and_sort(&items, "", "All", NewsSort::Date, SortOrder::Desc);
        for pair in by_date.windows(2) {
            assert!(pair[0].date >= pair[1].date);
        }

        let by_likes = filter_and_sort(&items, "", "All", NewsSort::Likes, SortOrder::Asc);
        for pair in by_likes.windows(2) {
            assert!(pair[0].likes <= pair[1].likes);
        }
    }

    #[test]
    fn test_premium_report_filter() {
        let reports = seed_reports();
        let premium = filter_reports(&reports, "", "All", true);
        assert!(premium.iter().all(|r| r.premium));
        assert!(premium.len() < reports.len());

        let by_author = filter_reports(&reports, "vasquez", "All", false);
        assert_eq!(by_author.len(), 2);
    }
}
