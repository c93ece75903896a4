//! Static option tables
//!
//! Preset option lists are resolved at render time and are never written
//! into stored configurations.

use formwright_core::{OptionItem, OptionsPreset};

/// 56 ethnic groups plus "other"
pub const ETHNICITY: &[&str] = &[
    "汉族", "壮族", "满族", "回族", "苗族", "维吾尔族", "土家族", "彝族", "蒙古族", "藏族",
    "布依族", "侗族", "瑶族", "朝鲜族", "白族", "哈尼族", "哈萨克族", "黎族", "傣族", "畲族",
    "傈僳族", "仡佬族", "东乡族", "拉祜族", "水族", "佤族", "纳西族", "羌族", "土族", "仫佬族",
    "锡伯族", "柯尔克孜族", "达斡尔族", "景颇族", "毛南族", "撒拉族", "布朗族", "塔吉克族",
    "阿昌族", "普米族", "鄂温克族", "怒族", "京族", "基诺族", "德昂族", "保安族", "俄罗斯族",
    "裕固族", "乌孜别克族", "门巴族", "鄂伦春族", "独龙族", "塔塔尔族", "赫哲族", "珞巴族",
    "其他",
];

/// Political affiliation as (label, value)
pub const POLITICAL: &[(&str, &str)] = &[
    ("群众(普通公民)", "群众"),
    ("共青团员", "共青团员"),
    ("中共党员", "中共党员"),
    ("民主党派", "民主党派"),
    ("无党派人士", "无党派人士"),
];

pub const EDUCATION: &[&str] = &[
    "博士", "硕士", "本科", "大专", "高中/中专", "初中", "小学", "文盲",
];

pub const GENDER: &[&str] = &["男", "女"];

pub const MARITAL_STATUS: &[&str] = &["未婚", "已婚"];

/// Provincial-level divisions
pub const PROVINCES: &[&str] = &[
    "北京市", "天津市", "河北省", "山西省", "内蒙古自治区", "辽宁省", "吉林省", "黑龙江省",
    "上海市", "江苏省", "浙江省", "安徽省", "福建省", "江西省", "山东省", "河南省", "湖北省",
    "湖南省", "广东省", "广西壮族自治区", "海南省", "重庆市", "四川省", "贵州省", "云南省",
    "西藏自治区", "陕西省", "甘肃省", "青海省", "宁夏回族自治区", "新疆维吾尔自治区", "台湾省",
    "香港特别行政区", "澳门特别行政区",
];

/// Province → city → district hierarchy for cascading selects
const REGIONS: &[(&str, &[(&str, &[&str])])] = &[
    (
        "北京市",
        &[(
            "北京市",
            &["东城区", "西城区", "朝阳区", "丰台区", "海淀区", "通州区"],
        )],
    ),
    (
        "上海市",
        &[("上海市", &["黄浦区", "徐汇区", "长宁区", "静安区", "浦东新区"])],
    ),
    (
        "广东省",
        &[
            ("广州市", &["越秀区", "海珠区", "天河区", "白云区", "番禺区"]),
            ("深圳市", &["罗湖区", "福田区", "南山区", "宝安区", "龙岗区"]),
            ("珠海市", &["香洲区", "斗门区", "金湾区"]),
        ],
    ),
    (
        "浙江省",
        &[
            ("杭州市", &["上城区", "拱墅区", "西湖区", "滨江区", "余杭区"]),
            ("宁波市", &["海曙区", "江北区", "鄞州区"]),
        ],
    ),
    (
        "江苏省",
        &[
            ("南京市", &["玄武区", "秦淮区", "鼓楼区", "江宁区"]),
            ("苏州市", &["姑苏区", "虎丘区", "吴中区", "工业园区"]),
        ],
    ),
    (
        "四川省",
        &[
            ("成都市", &["锦江区", "青羊区", "金牛区", "武侯区", "成华区"]),
            ("绵阳市", &["涪城区", "游仙区", "安州区"]),
        ],
    ),
];

fn same_options(items: &[&str]) -> Vec<OptionItem> {
    items.iter().map(|s| OptionItem::same(s)).collect()
}

/// Nested province/city/district options
pub fn cascader_options() -> Vec<OptionItem> {
    REGIONS
        .iter()
        .map(|(province, cities)| {
            OptionItem::same(province).with_children(
                cities
                    .iter()
                    .map(|(city, districts)| {
                        OptionItem::same(city).with_children(same_options(districts))
                    })
                    .collect(),
            )
        })
        .collect()
}

/// Options for a preset list
pub fn preset_options(preset: OptionsPreset) -> Vec<OptionItem> {
    match preset {
        OptionsPreset::Ethnicity => same_options(ETHNICITY),
        OptionsPreset::Political => POLITICAL
            .iter()
            .map(|(label, value)| OptionItem::new(*label, *value))
            .collect(),
        OptionsPreset::Education => same_options(EDUCATION),
        OptionsPreset::Gender => same_options(GENDER),
        OptionsPreset::Province => same_options(PROVINCES),
        OptionsPreset::Cascader => cascader_options(),
        OptionsPreset::MaritalStatus => same_options(MARITAL_STATUS),
    }
}

/// Options one level below the selected path; the root level for an empty path
pub fn children_at<'a>(options: &'a [OptionItem], path: &[String]) -> &'a [OptionItem] {
    let mut level = options;
    for segment in path {
        match level.iter().find(|o| o.value.to_string() == *segment) {
            Some(option) => level = &option.children,
            None => return &[],
        }
    }
    level
}

/// Labels along a selected cascader path, stopping at the first unknown value
pub fn path_labels(options: &[OptionItem], path: &[String]) -> Vec<String> {
    let mut labels = Vec::with_capacity(path.len());
    let mut level = options;
    for segment in path {
        let Some(option) = level.iter().find(|o| o.value.to_string() == *segment) else {
            break;
        };
        labels.push(option.label.clone());
        level = &option.children;
    }
    labels
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use formwright_core::OptionValue;

    #[test]
    fn test_table_sizes() {
        assert_eq!(ETHNICITY.len(), 57);
        assert_eq!(PROVINCES.len(), 34);
        assert_eq!(EDUCATION.len(), 8);
        assert_eq!(preset_options(OptionsPreset::Gender).len(), 2);
        assert_eq!(preset_options(OptionsPreset::MaritalStatus).len(), 2);
    }

    #[test]
    fn test_political_label_differs_from_value() {
        let options = preset_options(OptionsPreset::Political);
        assert_eq!(options[0].label, "群众(普通公民)");
        assert_eq!(options[0].value, OptionValue::from("群众"));
    }

    #[test]
    fn test_cascader_is_three_levels() {
        let options = cascader_options();
        let guangdong = options
            .iter()
            .find(|o| o.label == "广东省")
            .expect("guangdong present");
        let shenzhen = guangdong
            .children
            .iter()
            .find(|c| c.label == "深圳市")
            .expect("shenzhen present");
        assert!(shenzhen.children.iter().any(|d| d.label == "南山区"));
        assert!(shenzhen.children.iter().all(|d| !d.has_children()));
    }

    #[test]
    fn test_children_at() {
        let options = cascader_options();
        assert_eq!(children_at(&options, &[]).len(), options.len());
        let cities = children_at(&options, &["浙江省".to_string()]);
        assert_eq!(cities.len(), 2);
        assert!(children_at(&options, &["火星".to_string()]).is_empty());
    }

    #[test]
    fn test_path_labels() {
        let options = cascader_options();
        let path = vec![
            "四川省".to_string(),
            "成都市".to_string(),
            "武侯区".to_string(),
        ];
        assert_eq!(path_labels(&options, &path), vec!["四川省", "成都市", "武侯区"]);

        let partial = vec!["四川省".to_string(), "不存在".to_string()];
        assert_eq!(path_labels(&options, &partial), vec!["四川省"]);
    }
}
