//! Sample predictor outputs
//!
//! One file per supported tool, trimmed to two peptides. Values are chosen
//! so that `SIINFEKL` against A*02:01 reports 500 nM wherever the tool
//! reports an IC50.

/// `netMHC -x` (3.4)
pub const NETMHC_34_OUTPUT: &str = "\
# netMHC version 3.4. 8mer predictions using Artificial Neural Networks - Direct.

Protein\tpos\tpeptide\tHLA-A02:01 (nM)\tHLA-A01:01 (nM)\tAverage
0\t0\tSIINFEKL\t500.0\t25000.0\t12750.0
0\t1\tGILGFVFTL\t4.5\t60000.0\t30002.25
";

/// `netMHC-3.0 -x`
pub const NETMHC_30A_OUTPUT: &str = "\
# netMHC version 3.0. Artificial Neural Networks - Direct.

Protein\tpos\tpeptide\tA0201 (nM)\tA0101 (nM)\tAverage
0\t0\tSIINFEKL\t500.0\t25000.0\t12750.0
0\t1\tGILGFVFTL\t4.5\t60000.0\t30002.25
";

/// `netMHCpan -xls` (2.4)
pub const NETMHCPAN_24_OUTPUT: &str = "\
Pos\tPeptide\tID\tHLA-A02:01\tHLA-A01:01\tAve
0\tSIINFEKL\tPEPLIST\t500.0\t25000.0\t12750.0
1\tGILGFVFTL\tPEPLIST\t4.5\t60000.0\t30002.25
";

/// `netMHCpan -xls` (2.8)
pub const NETMHCPAN_28_OUTPUT: &str = "\
\t\t\tHLA-A02:01\t\t\tHLA-A01:01\t\t\t\t
Pos\tPeptide\tID\t1-log50k\tnM\tRank\t1-log50k\tnM\tRank\tAve\tNB
0\tSIINFEKL\tPEPLIST\t0.4256\t500.0\t2.00\t0.0641\t25000.0\t50.00\t0.2448\t0
1\tGILGFVFTL\tPEPLIST\t0.8610\t4.5\t0.05\t0.0000\t60000.0\t99.00\t0.4305\t1
";

/// `netMHCII ... | grep -v "#"` (2.2)
pub const NETMHCII_22_OUTPUT: &str = "\
Allele      pos   peptide          core       1-log50k(aff) affinity(nM) Bind Level Protein Name
-----------------------------------------------------------------------------------------------
HLA-DRB10101   0   PKYVKQNTLKLATGM  YVKQNTLKL  0.712   22.5     SB   pepe_0
HLA-DRB10401   0   PKYVKQNTLKLATGM  YVKQNTLKL  0.301   1950.0        pepe_0
-----------------------------------------------------------------------------------------------
";

/// `netMHCIIpan -xls` (3.0)
pub const NETMHCIIPAN_30_OUTPUT: &str = "\
\t\t\tDRB1*01:01\t\t\tDRB1*04:01\t\t\t\t
Pos\tPeptide\tID\t1-log50k\tnM\tRank\t1-log50k\tnM\tRank\tAve\tNB
0\tPKYVKQNTLKLAT\tSeq\t0.712\t22.5\t1.50\t0.301\t1950.0\t15.00\t0.5065\t2
";

/// `PickPocket ... | grep -v "#"` (1.1)
pub const PICKPOCKET_11_OUTPUT: &str = "\
------------------------------------------------------------------
 pos  HLA          peptide    Identity  1-log50k(aff)  Affinity(nM)  Bind Level
------------------------------------------------------------------
   0  HLA-A*02:01  SIINFEKL   PEPLIST   0.211          5000.00
   1  HLA-A*02:01  GILGFVFTL  PEPLIST   0.689          29.10         SB
   0  HLA-A*01:01  SIINFEKL   PEPLIST   0.045          31000.00
   1  HLA-A*01:01  GILGFVFTL  PEPLIST   0.032          35500.00
------------------------------------------------------------------
";

/// `netctlpan > out` (1.1)
pub const NETCTLPAN_11_OUTPUT: &str = "\
# NetCTLpan version 1.1
# Weight on C-terminal cleavage 0.225, weight on TAP 0.025
---------------------------------------------------------------------------
 N  Sequence_Name  Allele       Peptide    MHC     TAP     Cle     Comb    %Rank
---------------------------------------------------------------------------
 0  pepe_0         HLA-A*02:01  SIINFEKL   0.4256  1.2340  0.9500  0.6012  1.50
 1  pepe_1         HLA-A*02:01  GILGFVFTL  0.8610  2.1000  0.9700  1.2231  0.05
";

/// Well-formed output for the mock method: `allele<TAB>peptide<TAB>value`
pub fn mock_output(rows: &[(&str, &str, f64)]) -> String {
    rows.iter()
        .map(|(allele, peptide, value)| format!("{}\t{}\t{}\n", allele, peptide, value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_separated_fixtures_keep_tabs() {
        for fixture in [
            NETMHC_34_OUTPUT,
            NETMHCPAN_24_OUTPUT,
            NETMHCPAN_28_OUTPUT,
            NETMHCIIPAN_30_OUTPUT,
        ] {
            assert!(fixture.lines().any(|l| l.split('\t').count() > 4));
        }
    }

    #[test]
    fn test_mock_output() {
        let text = mock_output(&[("HLA-A02:01", "SIINFEKL", 500.0)]);
        assert_eq!(text, "HLA-A02:01\tSIINFEKL\t500\n");
    }
}
