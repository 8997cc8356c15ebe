//! Fixed GAUSS word lists.
//!
//! All lookups are case-insensitive, matching the lexer's matching discipline. The built-in
//! function list does not take part in lexing: calls to built-ins are picked up by the generic
//! call-site rule like any other procedure. [`classify_word`] still reports them.

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// Reserved words and statement keywords.
pub const KEYWORDS: &[&str] = &[
    "and", "bool", "break", "call", "callexe", "checkinterrupt", "clear", "clearg", "closeall",
    "cls", "comlog", "compile", "continue", "create", "debug", "declare", "delete", "disable",
    "dlibrary", "dllcall", "do", "dos", "edit", "ed", "else", "elseif", "enable", "end", "endfor",
    "endif", "endp", "endo", "errorlog", "errorlogat", "expr", "external", "fn", "format", "for",
    "goto", "gosub", "graph", "if", "keyword", "lib", "library", "line", "load", "loadarray",
    "loadexe", "loadf", "loadk", "loadm", "loadp", "loads", "loadx", "locate", "loopnextindex",
    "lprint", "lpwidth", "lshow", "msym", "ndpclex", "new", "not", "open", "or", "output",
    "outwidth", "plotsym", "plot", "pop", "prcsn", "print", "printdos", "proc", "push", "retp",
    "return", "rndcon", "rndmod", "rndmult", "rndseed", "run", "saveall", "save", "screen",
    "scroll", "setarray", "show", "stop", "system", "trace", "trap", "threadfor", "threadendfor",
    "threadbegin", "threadjoin", "threadstat", "threadend", "until", "use", "while", "winprint",
    "with",
];

/// Declaration keywords.
pub const DECLARATIONS: &[&str] = &[
    "struct", "local", "matrix", "string", "array", "scalar", "sparse", "let",
];

/// Built-in library procedures.
pub const BUILTINS: &[&str] = &[
    "abs", "acf", "aconcat", "aeye", "amax", "amean", "AmericanBinomCall",
    "AmericanBinomCall_Greeks", "AmericanBinomCall_ImpVol", "AmericanBinomPut",
    "AmericanBinomPut_Greeks", "AmericanBinomPut_ImpVol", "AmericanBSCall",
    "AmericanBSCall_Greeks", "AmericanBSCall_ImpVol", "AmericanBSPut", "AmericanBSPut_Greeks",
    "AmericanBSPut_ImpVol", "amin", "amult", "annotationGetDefaults", "annotationSetBkd",
    "annotationSetFont", "annotationSetLineColor", "annotationSetLineStyle",
    "annotationSetLineThickness", "annualTradingDays", "arccos", "arcsin", "areshape",
    "arrayalloc", "arrayindex", "arrayinit", "arraytomat", "asciiload", "asclabel", "astd",
    "astds", "asum", "atan", "atan2", "atranspose", "axmargin", "balance", "band", "bandchol",
    "bandcholsol", "bandltsol", "bandrv", "bandsolpd", "bar", "base10", "begwind", "besselj",
    "bessely", "beta", "box", "boxcox", "cdfBeta", "cdfBetaInv", "cdfBinomial", "cdfBinomialInv",
    "cdfBvn", "cdfBvn2", "cdfBvn2e", "cdfCauchy", "cdfCauchyInv", "cdfChic", "cdfChii", "cdfChinc",
    "cdfChincInv", "cdfExp", "cdfExpInv", "cdfFc", "cdfFnc", "cdfFncInv", "cdfGam", "cdfGenPareto",
    "cdfHyperGeo", "cdfLaplace", "cdfLaplaceInv", "cdfLogistic", "cdfLogisticInv",
    "cdfmControlCreate", "cdfMvn", "cdfMvn2e", "cdfMvnce", "cdfMvne", "cdfMvt2e", "cdfMvtce",
    "cdfMvte", "cdfN", "cdfN2", "cdfNc", "cdfNegBinomial", "cdfNegBinomialInv", "cdfNi",
    "cdfPoisson", "cdfPoissonInv", "cdfRayleigh", "cdfRayleighInv", "cdfTc", "cdfTci", "cdfTnc",
    "cdfTvn", "cdfWeibull", "cdfWeibullInv", "cdir", "ceil", "ChangeDir", "chdir", "chiBarSquare",
    "chol", "choldn", "cholsol", "cholup", "chrs", "close", "code", "cols", "colsf", "combinate",
    "combinated", "complex", "con", "cond", "conj", "cons", "ConScore", "contour", "conv",
    "convertsatostr", "convertstrtosa", "corrm", "corrms", "corrvc", "corrx", "corrxs", "cos",
    "cosh", "counts", "countwts", "crossprd", "crout", "croutp", "csrcol", "csrlin", "csvReadM",
    "csvReadSA", "cumprodc", "cumsumc", "curve", "cvtos", "datacreate", "datacreatecomplex",
    "datalist", "dataload", "dataloop", "dataopen", "datasave", "date", "datestr", "datestring",
    "datestrymd", "dayinyr", "dayofweek", "dbAddDatabase", "dbClose", "dbCommit", "dbCreateQuery",
    "dbExecQuery", "dbGetConnectOptions", "dbGetDatabaseName", "dbGetDriverName", "dbGetDrivers",
    "dbGetHostName", "dbGetLastErrorNum", "dbGetLastErrorText", "dbGetNumericalPrecPolicy",
    "dbGetPassword", "dbGetPort", "dbGetTableHeaders", "dbGetTables", "dbGetUserName",
    "dbHasFeature", "dbIsDriverAvailable", "dbIsOpen", "dbIsOpenError", "dbOpen",
    "dbQueryBindValue", "dbQueryClear", "dbQueryCols", "dbQueryExecPrepared", "dbQueryFetchAllM",
    "dbQueryFetchAllSA", "dbQueryFetchOneM", "dbQueryFetchOneSA", "dbQueryFinish",
    "dbQueryGetBoundValue", "dbQueryGetBoundValues", "dbQueryGetField", "dbQueryGetLastErrorNum",
    "dbQueryGetLastErrorText", "dbQueryGetLastInsertID", "dbQueryGetLastQuery",
    "dbQueryGetPosition", "dbQueryIsActive", "dbQueryIsForwardOnly", "dbQueryIsNull",
    "dbQueryIsSelect", "dbQueryIsValid", "dbQueryPrepare", "dbQueryRows", "dbQuerySeek",
    "dbQuerySeekFirst", "dbQuerySeekLast", "dbQuerySeekNext", "dbQuerySeekPrevious",
    "dbQuerySetForwardOnly", "dbRemoveDatabase", "dbRollback", "dbSetConnectOptions",
    "dbSetDatabaseName", "dbSetHostName", "dbSetNumericalPrecPolicy", "dbSetPort", "dbSetUserName",
    "dbTransaction", "DeleteFile", "delif", "delrows", "denseToSp", "denseToSpRE", "denToZero",
    "design", "det", "detl", "dfft", "dffti", "diag", "diagrv", "digamma", "doswin",
    "DOSWinCloseall", "DOSWinOpen", "dotfeq", "dotfeqmt", "dotfge", "dotfgemt", "dotfgt",
    "dotfgtmt", "dotfle", "dotflemt", "dotflt", "dotfltmt", "dotfne", "dotfnemt", "draw", "drop",
    "dsCreate", "dstat", "dstatmt", "dstatmtControlCreate", "dtdate", "dtday", "dttime", "dttodtv",
    "dttostr", "dttoutc", "dtvnormal", "dtvtodt", "dtvtoutc", "dummy", "dummybr", "dummydn", "eig",
    "eigh", "eighv", "eigv", "elapsedTradingDays", "endwind", "envget", "eof", "eqSolve",
    "eqSolvemt", "eqSolvemtControlCreate", "eqSolvemtOutCreate", "eqSolveset", "erf", "erfc",
    "erfccplx", "erfcplx", "error", "etdays", "ethsec", "etstr", "EuropeanBinomCall",
    "EuropeanBinomCall_Greeks", "EuropeanBinomCall_ImpVol", "EuropeanBinomPut",
    "EuropeanBinomPut_Greeks", "EuropeanBinomPut_ImpVol", "EuropeanBSCall",
    "EuropeanBSCall_Greeks", "EuropeanBSCall_ImpVol", "EuropeanBSPut", "EuropeanBSPut_Greeks",
    "EuropeanBSPut_ImpVol", "exctsmpl", "exec", "execbg", "exp", "extern", "eye", "fcheckerr",
    "fclearerr", "feq", "feqmt", "fflush", "fft", "ffti", "fftm", "fftmi", "fftn", "fge", "fgemt",
    "fgets", "fgetsa", "fgetsat", "fgetst", "fgt", "fgtmt", "fileinfo", "filesa", "fle", "flemt",
    "floor", "flt", "fltmt", "fmod", "fne", "fnemt", "fonts", "fopen", "formatcv", "formatnv",
    "fputs", "fputst", "fseek", "fstrerror", "ftell", "ftocv", "ftos", "ftostrC", "gamma",
    "gammacplx", "gammaii", "gausset", "gdaAppend", "gdaCreate", "gdaDStat", "gdaDStatMat",
    "gdaGetIndex", "gdaGetName", "gdaGetNames", "gdaGetOrders", "gdaGetType", "gdaGetTypes",
    "gdaGetVarInfo", "gdaIsCplx", "gdaLoad", "gdaPack", "gdaRead", "gdaReadByIndex", "gdaReadSome",
    "gdaReadSparse", "gdaReadStruct", "gdaReportVarInfo", "gdaSave", "gdaUpdate",
    "gdaUpdateAndPack", "gdaVars", "gdaWrite", "gdaWrite32", "gdaWriteSome", "getarray", "getdims",
    "getf", "getGAUSShome", "getmatrix", "getmatrix4D", "getname", "getnamef", "getNextTradingDay",
    "getNextWeekDay", "getnr", "getorders", "getpath", "getPreviousTradingDay",
    "getPreviousWeekDay", "getRow", "getscalar3D", "getscalar4D", "getTrRow", "getwind", "glm",
    "gradcplx", "gradMT", "gradMTm", "gradMTT", "gradMTTm", "gradp", "graphprt", "graphset",
    "hasimag", "header", "headermt", "hess", "hessMT", "hessMTg", "hessMTgw", "hessMTm",
    "hessMTmw", "hessMTT", "hessMTTg", "hessMTTgw", "hessMTTm", "hessMTw", "hessp", "hist",
    "histf", "histp", "hsec", "imag", "indcv", "indexcat", "indices", "indices2", "indicesf",
    "indicesfn", "indnv", "indsav", "indx", "integrate1d", "integrateControlCreate", "intgrat2",
    "intgrat3", "inthp1", "inthp2", "inthp3", "inthp4", "inthpControlCreate", "intquad1",
    "intquad2", "intquad3", "intrleav", "intrleavsa", "intrsect", "intsimp", "inv", "invpd",
    "invswp", "iscplx", "iscplxf", "isden", "isinfnanmiss", "ismiss", "key", "keyav", "keyw",
    "lag", "lag1", "lagn", "lapEighb", "lapEighi", "lapEighvb", "lapEighvi", "lapgEig", "lapgEigh",
    "lapgEighv", "lapgEigv", "lapgSchur", "lapgSvdcst", "lapgSvds", "lapgSvdst", "lapSvdcusv",
    "lapSvds", "lapSvdusv", "ldlp", "ldlsol", "linSolve", "listwise", "ln", "lncdfbvn",
    "lncdfbvn2", "lncdfmvn", "lncdfn", "lncdfn2", "lncdfnc", "lnfact", "lngammacplx", "lnpdfmvn",
    "lnpdfmvt", "lnpdfn", "lnpdft", "loadd", "loadstruct", "loadwind", "loess", "loessmt",
    "loessmtControlCreate", "log", "loglog", "logx", "logy", "lower", "lowmat", "lowmat1",
    "ltrisol", "lu", "lusol", "machEpsilon", "make", "makevars", "makewind", "margin", "matalloc",
    "matinit", "mattoarray", "maxbytes", "maxc", "maxindc", "maxv", "maxvec", "mbesselei",
    "mbesselei0", "mbesselei1", "mbesseli", "mbesseli0", "mbesseli1", "meanc", "median", "mergeby",
    "mergevar", "minc", "minindc", "minv", "miss", "missex", "missrv", "moment", "momentd",
    "movingave", "movingaveExpwgt", "movingaveWgt", "nextindex", "nextn", "nextnevn", "nextwind",
    "ntos", "null", "null1", "numCombinations", "ols", "olsmt", "olsmtControlCreate", "olsqr",
    "olsqr2", "olsqrmt", "ones", "optn", "optnevn", "orth", "outtyp", "pacf", "packedToSp",
    "packr", "parse", "pause", "pdfCauchy", "pdfChi", "pdfExp", "pdfGenPareto", "pdfHyperGeo",
    "pdfLaplace", "pdfLogistic", "pdfn", "pdfPoisson", "pdfRayleigh", "pdfWeibull", "pi", "pinv",
    "pinvmt", "plotAddArrow", "plotAddBar", "plotAddBox", "plotAddHist", "plotAddHistF",
    "plotAddHistP", "plotAddPolar", "plotAddScatter", "plotAddShape", "plotAddTextbox",
    "plotAddTS", "plotAddXY", "plotArea", "plotBar", "plotBox", "plotClearLayout", "plotContour",
    "plotCustomLayout", "plotGetDefaults", "plotHist", "plotHistF", "plotHistP", "plotLayout",
    "plotLogLog", "plotLogX", "plotLogY", "plotOpenWindow", "plotPolar", "plotSave", "plotScatter",
    "plotSetAxesPen", "plotSetBar", "plotSetBarFill", "plotSetBarStacked", "plotSetBkdColor",
    "plotSetFill", "plotSetGrid", "plotSetLegend", "plotSetLineColor", "plotSetLineStyle",
    "plotSetLineSymbol", "plotSetLineThickness", "plotSetNewWindow", "plotSetTitle",
    "plotSetWhichYAxis", "plotSetXAxisShow", "plotSetXLabel", "plotSetXRange",
    "plotSetXTicInterval", "plotSetXTicLabel", "plotSetYAxisShow", "plotSetYLabel",
    "plotSetYRange", "plotSetZAxisShow", "plotSetZLabel", "plotSurface", "plotTS", "plotXY",
    "polar", "polychar", "polyeval", "polygamma", "polyint", "polymake", "polymat", "polymroot",
    "polymult", "polyroot", "pqgwin", "previousindex", "princomp", "printfm", "printfmt", "prodc",
    "psi", "putarray", "putf", "putvals", "pvCreate", "pvGetIndex", "pvGetParNames",
    "pvGetParVector", "pvLength", "pvList", "pvPack", "pvPacki", "pvPackm", "pvPackmi", "pvPacks",
    "pvPacksi", "pvPacksm", "pvPacksmi", "pvPutParVector", "pvTest", "pvUnpack", "QNewton",
    "QNewtonmt", "QNewtonmtControlCreate", "QNewtonmtOutCreate", "QNewtonSet", "QProg", "QProgmt",
    "QProgmtInCreate", "qqr", "qqre", "qqrep", "qr", "qre", "qrep", "qrsol", "qrtsol", "qtyr",
    "qtyre", "qtyrep", "quantile", "quantiled", "qyr", "qyre", "qyrep", "qz", "rank", "rankindx",
    "readr", "real", "reclassify", "reclassifyCuts", "recode", "recserar", "recsercp", "recserrc",
    "rerun", "rescale", "reshape", "rets", "rev", "rfft", "rffti", "rfftip", "rfftn", "rfftnp",
    "rfftp", "rndBernoulli", "rndBeta", "rndBinomial", "rndCauchy", "rndChiSquare", "rndCon",
    "rndCreateState", "rndExp", "rndGamma", "rndGeo", "rndGumbel", "rndHyperGeo", "rndi",
    "rndKMbeta", "rndKMgam", "rndKMi", "rndKMn", "rndKMnb", "rndKMp", "rndKMu", "rndKMvm",
    "rndLaplace", "rndLCbeta", "rndLCgam", "rndLCi", "rndLCn", "rndLCnb", "rndLCp", "rndLCu",
    "rndLCvm", "rndLogNorm", "rndMTu", "rndMVn", "rndMVt", "rndn", "rndnb", "rndNegBinomial",
    "rndp", "rndPoisson", "rndRayleigh", "rndStateSkip", "rndu", "rndvm", "rndWeibull",
    "rndWishart", "rotater", "round", "rows", "rowsf", "rref", "sampleData", "satostrC", "saved",
    "saveStruct", "savewind", "scale", "scale3d", "scalerr", "scalinfnanmiss", "scalmiss",
    "schtoc", "schur", "searchsourcepath", "seekr", "select", "selif", "seqa", "seqm", "setdif",
    "setdifsa", "setvars", "setvwrmode", "setwind", "shell", "shiftr", "sin", "singleindex",
    "sinh", "sleep", "solpd", "sortc", "sortcc", "sortd", "sorthc", "sorthcc", "sortind",
    "sortindc", "sortmc", "sortr", "sortrc", "spBiconjGradSol", "spChol", "spConjGradSol",
    "spCreate", "spDenseSubmat", "spDiagRvMat", "spEigv", "spEye", "spLDL", "spline", "spLU",
    "spNumNZE", "spOnes", "spreadSheetReadM", "spreadSheetReadSA", "spreadSheetWrite", "spScale",
    "spSubmat", "spToDense", "spTrTDense", "spTScalar", "spZeros", "sqpSolve", "sqpSolveMT",
    "sqpSolveMTControlCreate", "sqpSolveMTlagrangeCreate", "sqpSolveMToutCreate", "sqpSolveSet",
    "sqrt", "statements", "stdc", "stdsc", "stocv", "stof", "strcombine", "strindx", "strlen",
    "strput", "strrindx", "strsect", "strsplit", "strsplitPad", "strtodt", "strtof", "strtofcplx",
    "strtriml", "strtrimr", "strtrim", "strtrunc", "strtruncl", "strtruncpad", "strtruncr",
    "submat", "subscat", "substute", "subvec", "sumc", "sumr", "surface", "svd", "svd1", "svd2",
    "svdcusv", "svds", "svdusv", "sysstate", "tab", "tan", "tanh", "tempname", "threadBegin",
    "threadEnd", "threadEndFor", "threadFor", "threadJoin", "threadStat", "time", "timedt",
    "timestr", "timeutc", "title", "tkf2eps", "tkf2ps", "tocart", "todaydt", "toeplitz", "token",
    "topolar", "trapchk", "trigamma", "trimr", "trunc", "type", "typecv", "typef", "union",
    "unionsa", "uniqindx", "uniqindxsa", "unique", "uniquesa", "upmat", "upmat1", "upper",
    "utctodt", "utctodtv", "utrisol", "vals", "varCovMS", "varCovXS", "varget", "vargetl",
    "varmall", "varmares", "varput", "varputl", "vartypef", "vcm", "vcms", "vcx", "vcxs", "vec",
    "vech", "vecr", "vector", "vget", "view", "viewxyz", "vlist", "vnamecv", "volume", "vput",
    "vread", "vtypecv", "wait", "waitc", "walkindex", "where", "window", "writer", "xlabel",
    "xlsGetSheetCount", "xlsGetSheetSize", "xlsGetSheetTypes", "xlsMakeRange", "xlsReadM",
    "xlsReadSA", "xlsWrite", "xlsWriteM", "xlsWriteSA", "xpnd", "xtics", "xy", "xyz", "ylabel",
    "ytics", "zeros", "zeta", "zlabel", "ztics",
];

/// Predefined constants.
pub const LITERALS: &[&str] = &[
    "DB_AFTER_LAST_ROW", "DB_ALL_TABLES", "DB_BATCH_OPERATIONS", "DB_BEFORE_FIRST_ROW", "DB_BLOB",
    "DB_EVENT_NOTIFICATIONS", "DB_FINISH_QUERY", "DB_HIGH_PRECISION", "DB_LAST_INSERT_ID",
    "DB_LOW_PRECISION_DOUBLE", "DB_LOW_PRECISION_INT32", "DB_LOW_PRECISION_INT64",
    "DB_LOW_PRECISION_NUMBERS", "DB_MULTIPLE_RESULT_SETS", "DB_NAMED_PLACEHOLDERS",
    "DB_POSITIONAL_PLACEHOLDERS", "DB_PREPARED_QUERIES", "DB_QUERY_SIZE", "DB_SIMPLE_LOCKING",
    "DB_SYSTEM_TABLES", "DB_TABLES", "DB_TRANSACTIONS", "DB_UNICODE", "DB_VIEWS", "__STDIN",
    "__STDOUT", "__STDERR",
];

static KEYWORD_SET: Lazy<HashSet<String>> = Lazy::new(|| lowercase_set(KEYWORDS));
static DECLARATION_SET: Lazy<HashSet<String>> = Lazy::new(|| lowercase_set(DECLARATIONS));
static BUILTIN_SET: Lazy<HashSet<String>> = Lazy::new(|| lowercase_set(BUILTINS));
static LITERAL_SET: Lazy<HashSet<String>> = Lazy::new(|| lowercase_set(LITERALS));

fn lowercase_set(words: &[&str]) -> HashSet<String> {
    words.iter().map(|word| word.to_lowercase()).collect()
}

pub fn is_keyword(word: &str) -> bool {
    KEYWORD_SET.contains(&word.to_lowercase())
}

pub fn is_declaration(word: &str) -> bool {
    DECLARATION_SET.contains(&word.to_lowercase())
}

pub fn is_builtin(word: &str) -> bool {
    BUILTIN_SET.contains(&word.to_lowercase())
}

pub fn is_literal(word: &str) -> bool {
    LITERAL_SET.contains(&word.to_lowercase())
}

/// Which fixed list a word belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WordClass {
    Literal,
    Keyword,
    Declaration,
    Builtin,
}

impl WordClass {
    pub fn as_str(self) -> &'static str {
        match self {
            WordClass::Literal => "literal",
            WordClass::Keyword => "keyword",
            WordClass::Declaration => "declaration",
            WordClass::Builtin => "builtin",
        }
    }
}

impl fmt::Display for WordClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Look `word` up in the fixed lists, in the lexer's rule order: literals, keywords,
/// declarations, then built-ins. `None` for an ordinary identifier.
pub fn classify_word(word: &str) -> Option<WordClass> {
    if is_literal(word) {
        Some(WordClass::Literal)
    } else if is_keyword(word) {
        Some(WordClass::Keyword)
    } else if is_declaration(word) {
        Some(WordClass::Declaration)
    } else if is_builtin(word) {
        Some(WordClass::Builtin)
    } else {
        None
    }
}

/// Build a regex alternation matching any of `words` followed by `suffix`.
///
/// Longer words come first so a word that is a prefix of another never shadows it.
pub fn words_pattern(words: &[&str], suffix: &str) -> String {
    let mut sorted: Vec<&str> = words.to_vec();
    sorted.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    sorted.dedup();
    let alternation: Vec<String> = sorted.iter().map(|word| regex::escape(word)).collect();
    format!("(?:{}){}", alternation.join("|"), suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookups_ignore_case() {
        assert!(is_keyword("ENDFOR"));
        assert!(is_keyword("threadFor"));
        assert!(is_declaration("Matrix"));
        assert!(is_literal("__stdout"));
        assert!(is_builtin("CDFN"));
        assert!(is_builtin("plotxy"));
        assert!(!is_keyword("foo"));
    }

    #[test]
    fn test_classify_word() {
        assert_eq!(classify_word("__STDERR"), Some(WordClass::Literal));
        assert_eq!(classify_word("EndP"), Some(WordClass::Keyword));
        assert_eq!(classify_word("sparse"), Some(WordClass::Declaration));
        assert_eq!(classify_word("olsqr"), Some(WordClass::Builtin));
        assert_eq!(classify_word("my_proc"), None);
        assert_eq!(WordClass::Builtin.to_string(), "builtin");
    }

    #[test]
    fn test_words_pattern_prefers_longer_words() {
        let pattern = words_pattern(&["end", "endfor"], r"\b");
        assert_eq!(pattern, r"(?:endfor|end)\b");
    }

    #[test]
    fn test_words_pattern_escapes() {
        let pattern = words_pattern(&["a.b"], "");
        assert_eq!(pattern, r"(?:a\.b)");
    }
}
