//! Locale string tables.
//!
//! Labels are looked up through the [`Translate`] capability so the timeline
//! assembler never reaches for a global table.

use serde::{Deserialize, Serialize};

/// Resolves a translation key to display text.
pub trait Translate {
    fn translate(&self, key: &str) -> String;
}

impl<F> Translate for F
where
    F: Fn(&str) -> String,
{
    fn translate(&self, key: &str) -> String {
        self(key)
    }
}

/// Supported UI languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Zh,
    En,
}

/// A locale name other than `zh` or `en`.
#[derive(Debug, thiserror::Error)]
#[error("Unsupported locale: {0} (expected zh or en)")]
pub struct UnknownLocale(pub String);

impl Locale {
    /// The other language.
    #[must_use]
    pub fn toggle(self) -> Self {
        match self {
            Self::Zh => Self::En,
            Self::En => Self::Zh,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::Zh => "zh",
            Self::En => "en",
        }
    }

    /// Look up a key, returning `None` when the table has no entry.
    pub fn lookup(self, key: &str) -> Option<&'static str> {
        match self {
            Self::Zh => zh(key),
            Self::En => en(key),
        }
    }
}

impl Translate for Locale {
    /// Missing keys come back verbatim.
    fn translate(&self, key: &str) -> String {
        self.lookup(key).unwrap_or(key).to_string()
    }
}

impl std::str::FromStr for Locale {
    type Err = UnknownLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "zh" | "zh-cn" | "cn" => Ok(Self::Zh),
            "en" | "en-us" | "en-gb" => Ok(Self::En),
            _ => Err(UnknownLocale(s.to_string())),
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[allow(clippy::too_many_lines)]
fn zh(key: &str) -> Option<&'static str> {
    let text = match key {
        "appTitle" => "你一生的旅程",
        "appSubtitle" => "YOUR LIFE'S JOURNEY",
        "appDescription" => "记录你人生中的重要时刻，将回忆编织成一条璀璨的时间长河",
        "enterName" => "请输入你的名字",
        "startJourney" => "开始记录我的旅程",
        "journeyOf" => "的人生旅程",
        "journeyContinues" => "旅程仍在继续...",
        "customEvent" => "自定义事件",
        "customEventDesc" => "添加一个不在预设问题中的人生事件",
        "addCustomEvent" => "添加自定义事件",
        "noEvents" => "还没有任何事件，先去填写一些人生经历吧",
        "addEvent" => "添加事件",
        "startDate" => "开始日期",
        "endDate" => "结束日期",
        "exportPdf" => "导出",
        "exportFailed" => "导出失败，请重试",
        "exported" => "已导出",
        "setPassword" => "设置访问密码",
        "enterPassword" => "请输入访问密码",
        "passwordPlaceholder" => "密码",
        "confirmPassword" => "确认密码",
        "passwordMismatch" => "两次输入的密码不一致",
        "wrongPassword" => "密码错误",
        "skipPassword" => "跳过，不设置密码",
        "save" => "保存",
        "saved" => "已保存",
        "unlock" => "解锁",
        "image" => "图片",
        "delete" => "删除",
        "switchLang" => "English",

        "categories.birth" => "出生信息",
        "categories.education" => "教育经历",
        "categories.career" => "职业生涯",
        "categories.love" => "感情生活",
        "categories.family" => "家庭",
        "categories.achievements" => "成就与荣誉",
        "categories.relocation" => "人生转折",
        "categories.health" => "健康",
        "categories.travel" => "旅行",
        "categories.property" => "置业与财富",

        "questions.birthDate" => "出生日期",
        "questions.birthPlace" => "出生地点",
        "questions.birthStory" => "特别故事",
        "questions.primarySchool" => "小学",
        "questions.middleSchool" => "初中",
        "questions.highSchool" => "高中",
        "questions.university" => "大学",
        "questions.graduateSchool" => "研究生",
        "questions.firstJob" => "第一份工作",
        "questions.careerMilestone" => "职业里程碑",
        "questions.firstLove" => "初恋",
        "questions.engagement" => "订婚",
        "questions.marriage" => "结婚",
        "questions.firstChild" => "第一个孩子",
        "questions.moreChildren" => "更多孩子",
        "questions.awards" => "获奖/荣誉",
        "questions.specialAchievement" => "特别成就",
        "questions.majorMove" => "重大搬迁",
        "questions.lifeChange" => "人生转折点",
        "questions.healthEvent" => "重要健康事件",
        "questions.fitness" => "运动里程碑",
        "questions.memorableTrip" => "难忘的旅行",
        "questions.countries" => "去过的国家",
        "questions.firstHome" => "第一套房子",
        "questions.investment" => "重要投资",

        "placeholders.birthPlace" => "如：北京市海淀区",
        "placeholders.birthStory" => "关于你出生的特别故事...",
        "placeholders.school" => "学校名称",
        "placeholders.university" => "学校名称 / 专业",
        "placeholders.job" => "公司 / 职位",
        "placeholders.milestone" => "如：晋升、创业、转行...",
        "placeholders.loveStory" => "那段特别的故事...",
        "placeholders.engagement" => "订婚的故事",
        "placeholders.marriage" => "婚礼日期和故事",
        "placeholders.child" => "宝宝出生的喜悦",
        "placeholders.moreChildren" => "其他孩子的出生",
        "placeholders.awards" => "获得的重要荣誉",
        "placeholders.achievement" => "人生中的特别成就",
        "placeholders.move" => "如：移民、搬到新城市",
        "placeholders.lifeChange" => "改变人生轨迹的事件",
        "placeholders.health" => "如：手术、康复、重要体检",
        "placeholders.fitness" => "如：第一次跑完马拉松",
        "placeholders.trip" => "最难忘的一次旅行",
        "placeholders.countries" => "去过哪些国家和地区",
        "placeholders.home" => "第一套属于自己的房子",
        "placeholders.investment" => "重要的投资或理财决定",
        _ => return None,
    };
    Some(text)
}

#[allow(clippy::too_many_lines)]
fn en(key: &str) -> Option<&'static str> {
    let text = match key {
        "appTitle" => "Your Life's Journey",
        "appSubtitle" => "YOUR LIFE'S JOURNEY",
        "appDescription" => "Record the important moments of your life and weave them into a shining river of time",
        "enterName" => "Enter your name",
        "startJourney" => "Start recording my journey",
        "journeyOf" => "'s Life Journey",
        "journeyContinues" => "The journey continues...",
        "customEvent" => "Custom Event",
        "customEventDesc" => "Add a life event that is not covered by the preset questions",
        "addCustomEvent" => "Add Custom Event",
        "noEvents" => "No events yet. Fill in some of your life story first",
        "addEvent" => "Add Event",
        "startDate" => "Start Date",
        "endDate" => "End Date",
        "exportPdf" => "Export",
        "exportFailed" => "Export failed, please try again",
        "exported" => "Exported",
        "setPassword" => "Set an access password",
        "enterPassword" => "Enter your access password",
        "passwordPlaceholder" => "Password",
        "confirmPassword" => "Confirm password",
        "passwordMismatch" => "Passwords do not match",
        "wrongPassword" => "Wrong password",
        "skipPassword" => "Skip, no password",
        "save" => "Save",
        "saved" => "Saved",
        "unlock" => "Unlock",
        "image" => "Image",
        "delete" => "Delete",
        "switchLang" => "中文",

        "categories.birth" => "Birth Info",
        "categories.education" => "Education",
        "categories.career" => "Career",
        "categories.love" => "Love Life",
        "categories.family" => "Family",
        "categories.achievements" => "Achievements",
        "categories.relocation" => "Life Changes",
        "categories.health" => "Health",
        "categories.travel" => "Travel",
        "categories.property" => "Property",

        "questions.birthDate" => "Birth Date",
        "questions.birthPlace" => "Birth Place",
        "questions.birthStory" => "Special Story",
        "questions.primarySchool" => "Primary School",
        "questions.middleSchool" => "Middle School",
        "questions.highSchool" => "High School",
        "questions.university" => "University",
        "questions.graduateSchool" => "Graduate School",
        "questions.firstJob" => "First Job",
        "questions.careerMilestone" => "Career Milestone",
        "questions.firstLove" => "First Love",
        "questions.engagement" => "Engagement",
        "questions.marriage" => "Marriage",
        "questions.firstChild" => "First Child",
        "questions.moreChildren" => "More Children",
        "questions.awards" => "Awards/Honors",
        "questions.specialAchievement" => "Special Achievement",
        "questions.majorMove" => "Major Move",
        "questions.lifeChange" => "Life Turning Point",
        "questions.healthEvent" => "Health Event",
        "questions.fitness" => "Fitness Milestone",
        "questions.memorableTrip" => "Memorable Trip",
        "questions.countries" => "Countries Visited",
        "questions.firstHome" => "First Home",
        "questions.investment" => "Major Investment",

        "placeholders.birthPlace" => "e.g. Haidian District, Beijing",
        "placeholders.birthStory" => "A special story about your birth...",
        "placeholders.school" => "School name",
        "placeholders.university" => "School name / Major",
        "placeholders.job" => "Company / Position",
        "placeholders.milestone" => "e.g. promotion, startup, career change...",
        "placeholders.loveStory" => "That special story...",
        "placeholders.engagement" => "The engagement story",
        "placeholders.marriage" => "Wedding date and story",
        "placeholders.child" => "The joy of your baby's birth",
        "placeholders.moreChildren" => "Births of your other children",
        "placeholders.awards" => "Important honors received",
        "placeholders.achievement" => "A special achievement in your life",
        "placeholders.move" => "e.g. emigration, moving to a new city",
        "placeholders.lifeChange" => "An event that changed your path",
        "placeholders.health" => "e.g. surgery, recovery, major checkup",
        "placeholders.fitness" => "e.g. finishing your first marathon",
        "placeholders.trip" => "Your most memorable trip",
        "placeholders.countries" => "Countries and regions you have visited",
        "placeholders.home" => "Your first home of your own",
        "placeholders.investment" => "An important investment decision",
        _ => return None,
    };
    Some(text)
}
