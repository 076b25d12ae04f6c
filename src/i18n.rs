//! i18n module - internationalization support

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Language {
    #[default]
    En,
    Zh,
    Ja,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Zh => "zh",
            Language::Ja => "ja",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "zh" => Language::Zh,
            "ja" => Language::Ja,
            _ => Language::En,
        }
    }

    pub fn text(&self) -> &'static Translation {
        match self {
            Language::En => &EN_US,
            Language::Zh => &ZH_CN,
            Language::Ja => &JA_JP,
        }
    }
}

// Persisted through the string codec; unknown codes load as English.
impl From<String> for Language {
    fn from(s: String) -> Self {
        Self::from_str(&s)
    }
}

impl From<Language> for String {
    fn from(lang: Language) -> Self {
        lang.as_str().to_string()
    }
}

pub struct Translation {
    // Menus
    pub menu_file: &'static str, pub menu_edit: &'static str, pub menu_layer: &'static str, pub menu_help: &'static str,
    pub action_new: &'static str, pub action_open: &'static str, pub action_save: &'static str,
    pub action_save_as: &'static str, pub action_quit: &'static str,
    pub action_undo: &'static str, pub action_settings: &'static str, pub action_about: &'static str,

    // Layer menu & label context menu
    pub action_add_bitmap: &'static str, pub action_add_vector: &'static str,
    pub action_add_sound: &'static str, pub action_add_camera: &'static str,
    pub action_layer_properties: &'static str, pub action_toggle_visible: &'static str,
    pub action_move_up: &'static str, pub action_move_down: &'static str, pub action_delete_layer: &'static str,

    // Dialogs
    pub dialog_unsaved_title: &'static str, pub dialog_unsaved_body: &'static str,
    pub dialog_properties_title: &'static str,
    pub label_name: &'static str, pub label_fps: &'static str, pub label_duration: &'static str,

    // Buttons
    pub btn_create: &'static str, pub btn_cancel: &'static str, pub btn_save: &'static str,
    pub btn_dont_save: &'static str, pub btn_ok: &'static str,

    // Settings
    pub settings_title: &'static str, pub settings_general: &'static str, pub settings_appearance: &'static str,
    pub settings_language: &'static str, pub settings_theme: &'static str, pub settings_selection: &'static str,

    // Info bar & status messages
    pub info_layer: &'static str, pub info_frame: &'static str, pub info_key: &'static str,
    pub msg_saved: &'static str, pub msg_layer_limit: &'static str,

    // Tooltips
    pub hover_visibility_strip: &'static str, pub hover_visibility_mode: &'static str,
}

pub const EN_US: Translation = Translation {
    menu_file: "File", menu_edit: "Edit", menu_layer: "Layer", menu_help: "Help",
    action_new: "New Scene...", action_open: "Open...", action_save: "Save", action_save_as: "Save As...", action_quit: "Quit",
    action_undo: "Undo", action_settings: "Settings", action_about: "About",
    action_add_bitmap: "Add Bitmap Layer", action_add_vector: "Add Vector Layer", action_add_sound: "Add Sound Layer", action_add_camera: "Add Camera Layer",
    action_layer_properties: "Properties...", action_toggle_visible: "Show / Hide", action_move_up: "Move Up", action_move_down: "Move Down", action_delete_layer: "Delete Layer",
    dialog_unsaved_title: "Unsaved Changes", dialog_unsaved_body: "The current scene has unsaved changes.",
    dialog_properties_title: "Layer Properties",
    label_name: "Name:", label_fps: "FPS:", label_duration: "Duration:",
    btn_create: "Create", btn_cancel: "Cancel", btn_save: "Save", btn_dont_save: "Don't Save", btn_ok: "OK",
    settings_title: "Preferences", settings_general: "General", settings_appearance: "Appearance",
    settings_language: "Language", settings_theme: "Theme", settings_selection: "Selection Highlight",
    info_layer: "Layer", info_frame: "Frame", info_key: "Key",
    msg_saved: "Scene saved successfully.", msg_layer_limit: "Layer limit reached.",
    hover_visibility_strip: "Click to show or hide this layer", hover_visibility_mode: "Cycle how non-current layers are displayed",
};

pub const ZH_CN: Translation = Translation {
    menu_file: "文件", menu_edit: "编辑", menu_layer: "图层", menu_help: "帮助",
    action_new: "新建场景...", action_open: "打开...", action_save: "保存", action_save_as: "另存为...", action_quit: "退出",
    action_undo: "撤销", action_settings: "设置", action_about: "关于",
    action_add_bitmap: "添加位图图层", action_add_vector: "添加矢量图层", action_add_sound: "添加声音图层", action_add_camera: "添加摄像机图层",
    action_layer_properties: "属性...", action_toggle_visible: "显示 / 隐藏", action_move_up: "上移", action_move_down: "下移", action_delete_layer: "删除图层",
    dialog_unsaved_title: "未保存的更改", dialog_unsaved_body: "当前场景有未保存的更改。",
    dialog_properties_title: "图层属性",
    label_name: "名称:", label_fps: "帧率:", label_duration: "时长:",
    btn_create: "创建", btn_cancel: "取消", btn_save: "保存", btn_dont_save: "不保存", btn_ok: "确定",
    settings_title: "首选项", settings_general: "常规", settings_appearance: "外观",
    settings_language: "语言", settings_theme: "主题", settings_selection: "选中高亮",
    info_layer: "层", info_frame: "帧", info_key: "关键帧",
    msg_saved: "场景保存成功。", msg_layer_limit: "已达到图层上限。",
    hover_visibility_strip: "点击以显示或隐藏此图层", hover_visibility_mode: "切换非当前图层的显示方式",
};

pub const JA_JP: Translation = Translation {
    menu_file: "ファイル", menu_edit: "編集", menu_layer: "レイヤー", menu_help: "ヘルプ",
    action_new: "新規シーン...", action_open: "開く...", action_save: "保存", action_save_as: "名前を付けて保存...", action_quit: "終了",
    action_undo: "元に戻す", action_settings: "設定", action_about: "バージョン情報",
    action_add_bitmap: "ビットマップレイヤーを追加", action_add_vector: "ベクターレイヤーを追加", action_add_sound: "サウンドレイヤーを追加", action_add_camera: "カメラレイヤーを追加",
    action_layer_properties: "プロパティ...", action_toggle_visible: "表示 / 非表示", action_move_up: "上へ移動", action_move_down: "下へ移動", action_delete_layer: "レイヤーを削除",
    dialog_unsaved_title: "未保存の変更", dialog_unsaved_body: "現在のシーンには未保存の変更があります。",
    dialog_properties_title: "レイヤーのプロパティ",
    label_name: "名前:", label_fps: "FPS:", label_duration: "長さ:",
    btn_create: "作成", btn_cancel: "キャンセル", btn_save: "保存", btn_dont_save: "保存しない", btn_ok: "OK",
    settings_title: "設定", settings_general: "一般", settings_appearance: "外観",
    settings_language: "言語", settings_theme: "テーマ", settings_selection: "選択ハイライト",
    info_layer: "レイヤー", info_frame: "フレーム", info_key: "キー",
    msg_saved: "シーンを保存しました。", msg_layer_limit: "レイヤー数の上限に達しました。",
    hover_visibility_strip: "クリックでこのレイヤーを表示/非表示", hover_visibility_mode: "他レイヤーの表示方法を切り替え",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_codec_round_trip() {
        for lang in [Language::En, Language::Zh, Language::Ja] {
            assert_eq!(Language::from_str(lang.as_str()), lang);
        }
    }

    #[test]
    fn test_unknown_language_falls_back_to_english() {
        assert_eq!(Language::from_str("fr"), Language::En);
        assert_eq!(Language::from_str(""), Language::En);
    }

    #[test]
    fn test_translations_are_distinct() {
        assert_ne!(Language::En.text().menu_file, Language::Zh.text().menu_file);
        assert_ne!(Language::Zh.text().menu_file, Language::Ja.text().menu_file);
    }
}
