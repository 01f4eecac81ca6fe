//! Localization tables.
//!
//! Two languages are supported, selected once at startup from the platform's
//! reported language preference. There is no runtime language switch: the
//! selected [`Strings`] table is immutable for the lifetime of a workflow.

/// Supported display languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    /// English (default).
    #[default]
    En,
    /// Chinese.
    Zh,
}

impl Language {
    /// Select a language from a reported tag such as `zh-CN` or `en_US.UTF-8`.
    ///
    /// Any tag starting with `zh` (case-insensitive) selects Chinese; anything
    /// else, including no tag at all, selects English.
    pub fn detect(tag: Option<&str>) -> Self {
        match tag {
            Some(tag) if tag.len() >= 2 && tag.as_bytes()[..2].eq_ignore_ascii_case(b"zh") => {
                Self::Zh
            },
            _ => Self::En,
        }
    }

    /// BCP 47 primary tag.
    pub fn tag(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Zh => "zh",
        }
    }
}

/// Every user-visible message of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Msg {
    PageTitle,
    Step0Title,
    Step0Waiting,
    BtnDetails,
    BtnDownload,
    LabelUserId,
    LabelFingerprint,
    LabelAlgo,
    Step1Title,
    Step1Archived,
    PlaceholderMsg,
    BtnEncrypt,
    BtnEncrypting,
    Step2Title,
    BtnCopy,
    BtnEmail,
    LinkReset,
    Footer,
    ErrorLoadTitle,
    ErrorLoadDesc,
    BtnSelectFile,
    TextOrPaste,
    AlertNoOpenpgp,
    AlertInvalidKey,
    AlertEncryptFail,
    AlertCopyFail,
    BtnCopied,
    TextMsgEncrypted,
    AlertIntegrityFail,
}

impl Msg {
    /// All messages, in markup order.
    pub const ALL: [Self; 29] = [
        Self::PageTitle,
        Self::Step0Title,
        Self::Step0Waiting,
        Self::BtnDetails,
        Self::BtnDownload,
        Self::LabelUserId,
        Self::LabelFingerprint,
        Self::LabelAlgo,
        Self::Step1Title,
        Self::Step1Archived,
        Self::PlaceholderMsg,
        Self::BtnEncrypt,
        Self::BtnEncrypting,
        Self::Step2Title,
        Self::BtnCopy,
        Self::BtnEmail,
        Self::LinkReset,
        Self::Footer,
        Self::ErrorLoadTitle,
        Self::ErrorLoadDesc,
        Self::BtnSelectFile,
        Self::TextOrPaste,
        Self::AlertNoOpenpgp,
        Self::AlertInvalidKey,
        Self::AlertEncryptFail,
        Self::AlertCopyFail,
        Self::BtnCopied,
        Self::TextMsgEncrypted,
        Self::AlertIntegrityFail,
    ];

    /// Markup key (the `data-i18n` attribute value).
    pub fn key(self) -> &'static str {
        match self {
            Self::PageTitle => "page_title",
            Self::Step0Title => "step0_title",
            Self::Step0Waiting => "step0_waiting",
            Self::BtnDetails => "btn_details",
            Self::BtnDownload => "btn_download",
            Self::LabelUserId => "label_userid",
            Self::LabelFingerprint => "label_fingerprint",
            Self::LabelAlgo => "label_algo",
            Self::Step1Title => "step1_title",
            Self::Step1Archived => "step1_archived",
            Self::PlaceholderMsg => "placeholder_msg",
            Self::BtnEncrypt => "btn_encrypt",
            Self::BtnEncrypting => "btn_encrypting",
            Self::Step2Title => "step2_title",
            Self::BtnCopy => "btn_copy",
            Self::BtnEmail => "btn_email",
            Self::LinkReset => "link_reset",
            Self::Footer => "footer",
            Self::ErrorLoadTitle => "error_load_title",
            Self::ErrorLoadDesc => "error_load_desc",
            Self::BtnSelectFile => "btn_select_file",
            Self::TextOrPaste => "text_or_paste",
            Self::AlertNoOpenpgp => "alert_no_openpgp",
            Self::AlertInvalidKey => "alert_invalid_key",
            Self::AlertEncryptFail => "alert_encrypt_fail",
            Self::AlertCopyFail => "alert_copy_fail",
            Self::BtnCopied => "btn_copied",
            Self::TextMsgEncrypted => "text_msg_encrypted",
            Self::AlertIntegrityFail => "alert_integrity_fail",
        }
    }

    /// Reverse of [`Self::key`]. `None` for unknown keys.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|msg| msg.key() == key)
    }
}

/// String table for one language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Strings {
    language: Language,
}

impl Strings {
    /// Table for `language`.
    pub fn for_language(language: Language) -> Self {
        Self { language }
    }

    /// Language this table renders.
    pub fn language(&self) -> Language {
        self.language
    }

    /// Display string for `msg`.
    pub fn get(&self, msg: Msg) -> &'static str {
        match self.language {
            Language::En => en(msg),
            Language::Zh => zh(msg),
        }
    }

    /// Display string for a markup key. `None` when the key is unknown.
    pub fn lookup(&self, key: &str) -> Option<&'static str> {
        Msg::from_key(key).map(|msg| self.get(msg))
    }
}

fn en(msg: Msg) -> &'static str {
    match msg {
        Msg::PageTitle => "Secure Message Encryption | GPG Online",
        Msg::Step0Title => "Recipient Public Key",
        Msg::Step0Waiting => "WAITING...",
        Msg::BtnDetails => "View Details",
        Msg::BtnDownload => "Download Public Key",
        Msg::LabelUserId => "User ID:",
        Msg::LabelFingerprint => "Full Fingerprint:",
        Msg::LabelAlgo => "Algorithm:",
        Msg::Step1Title => "Compose Secret Message",
        Msg::Step1Archived => "Encrypted",
        Msg::PlaceholderMsg => {
            "Enter content here, or drag and drop a text file...\nAll encryption is done locally."
        },
        Msg::BtnEncrypt => "Encrypt Message",
        Msg::BtnEncrypting => "Processing...",
        Msg::Step2Title => "Encryption Complete",
        Msg::BtnCopy => "Copy Ciphertext",
        Msg::BtnEmail => "Send via Email",
        Msg::LinkReset => "Return to Edit or Rewrite",
        Msg::Footer => "Powered by OpenPGP | Single-File Secure Tool",
        Msg::ErrorLoadTitle => "Unable to Auto-load Public Key",
        Msg::ErrorLoadDesc => {
            "May be due to missing file or local security policy (CORS). Please manually load the `public.asc` file."
        },
        Msg::BtnSelectFile => "Select File...",
        Msg::TextOrPaste => "or paste into console",
        Msg::AlertNoOpenpgp => "OpenPGP implementation not found.",
        Msg::AlertInvalidKey => "Invalid public key file: ",
        Msg::AlertEncryptFail => "Encryption failed: ",
        Msg::AlertCopyFail => "Copy failed, please copy manually",
        Msg::BtnCopied => "Copied",
        Msg::TextMsgEncrypted => "Encrypted",
        Msg::AlertIntegrityFail => "Security Warning: Public key file integrity check failed!",
    }
}

fn zh(msg: Msg) -> &'static str {
    match msg {
        Msg::PageTitle => "安全讯息加密",
        Msg::Step0Title => "接收者公钥",
        Msg::Step0Waiting => "等待加载...",
        Msg::BtnDetails => "查看详情",
        Msg::BtnDownload => "下载公钥",
        Msg::LabelUserId => "用户信息:",
        Msg::LabelFingerprint => "完整指纹:",
        Msg::LabelAlgo => "加密算法:",
        Msg::Step1Title => "撰写信息",
        Msg::Step1Archived => "已加密",
        Msg::PlaceholderMsg => "在此输入内容，或拖入文本文件...\n所有加密均在本地完成。",
        Msg::BtnEncrypt => "执行加密",
        Msg::BtnEncrypting => "处理中...",
        Msg::Step2Title => "加密完成",
        Msg::BtnCopy => "复制密文",
        Msg::BtnEmail => "发送邮件",
        Msg::LinkReset => "返回修改或重新编写",
        Msg::Footer => "由 OpenPGP 驱动",
        Msg::ErrorLoadTitle => "无法自动加载公钥",
        Msg::ErrorLoadDesc => "可能由于文件缺失或本地安全策略限制。请手动加载 `public.asc` 文件。",
        Msg::BtnSelectFile => "📁 选择文件...",
        Msg::TextOrPaste => "或直接粘贴到控制台",
        Msg::AlertNoOpenpgp => "找不到 OpenPGP 实现。",
        Msg::AlertInvalidKey => "无效的公钥文件: ",
        Msg::AlertEncryptFail => "加密失败: ",
        Msg::AlertCopyFail => "复制失败，请手动复制",
        Msg::BtnCopied => "已复制",
        Msg::TextMsgEncrypted => "已加密",
        Msg::AlertIntegrityFail => "安全警告：公钥文件完整性校验失败！",
    }
}
